use crate::core::normalizer::Normalizer;
use crate::core::{NormalizationResult, Resolver, Result};
use std::fmt::Display;

fn id_or_none<T: Display>(id: Option<T>) -> String {
    id.map(|v| v.to_string())
        .unwrap_or_else(|| "None".to_string())
}

pub fn render_text(section: &str, row: &str, result: &NormalizationResult) -> String {
    format!(
        "Input:\n    [section] {}\t[row] {}\nOutput:\n    [section_id] {}\t[row_id] {}\nValid?:\n    {}",
        section,
        row,
        id_or_none(result.section_id),
        id_or_none(result.row_id),
        result.valid
    )
}

/// 單筆模式：正規化一組 (section, row) 並產生可顯示的結果
pub fn run_single<R: Resolver>(
    normalizer: &Normalizer<R>,
    section: &str,
    row: &str,
    as_json: bool,
) -> Result<String> {
    let result = normalizer.normalize(section, row);
    tracing::debug!("{}:{} -> {:?}", section, row, result);

    if as_json {
        Ok(serde_json::to_string(&result)?)
    } else {
        Ok(render_text(section, row, &result))
    }
}
