use crate::core::manifest::ManifestIndex;
use crate::domain::model::{NormalizationResult, SampleRecord};
use crate::domain::ports::Resolver;

/// 將原始 (section, row) 字串解析成清單中的標準 ID
pub struct Normalizer<R: Resolver = ManifestIndex> {
    resolver: R,
}

impl<R: Resolver> Normalizer<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// 找不到對應 ID 是正常結果 (valid = false)，不會回傳錯誤
    pub fn normalize(&self, section: &str, row: &str) -> NormalizationResult {
        // 空白輸入永遠無效，即使清單裡剛好有空字串名稱
        if section.trim().is_empty() || row.trim().is_empty() {
            return NormalizationResult::invalid();
        }

        let section_id = self.resolver.resolve_section(section);
        let row_id = section_id.and_then(|_| self.resolver.resolve_row(section, row));

        NormalizationResult::resolved(section_id, row_id)
    }

    /// 依輸入順序逐筆處理，每筆互不影響
    pub fn normalize_all(&self, mut records: Vec<SampleRecord>) -> Vec<SampleRecord> {
        for record in records.iter_mut() {
            record.output = self.normalize(&record.input.section, &record.input.row);
        }
        records
    }
}
