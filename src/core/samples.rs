use crate::domain::model::{SampleExpected, SampleRecord};
use crate::utils::error::Result;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

// section,row,section_id,row_id,valid
const INPUT_FIELDS: usize = 5;

/// 讀取批次輸入檔
///
/// 單筆格式錯誤只會記錄警告，不會中斷整個批次；
/// 只有檔案本身無法讀取時才回傳錯誤。
pub fn read_samples<P: AsRef<Path>>(path: P) -> Result<Vec<SampleRecord>> {
    let path = path.as_ref();
    tracing::debug!("Reading samples from {}", path.display());

    let file = File::open(path)?;
    let samples = read_samples_from(file)?;

    tracing::info!("📥 Read {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

pub fn read_samples_from<R: Read>(reader: R) -> Result<Vec<SampleRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut samples = Vec::new();
    let mut record = csv::ByteRecord::new();

    while csv_reader.read_byte_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        samples.push(parse_sample(&record, line));
    }

    Ok(samples)
}

fn parse_sample(record: &csv::ByteRecord, line: u64) -> SampleRecord {
    let field = |i: usize| {
        record
            .get(i)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    };

    if record.len() < 2 {
        tracing::warn!(
            "Line {}: expected at least section and row, found {} fields",
            line,
            record.len()
        );
    }

    let sample = SampleRecord::new(
        field(0).unwrap_or_default(),
        field(1).unwrap_or_default(),
    );

    if record.len() < INPUT_FIELDS {
        if record.len() >= 2 {
            tracing::warn!(
                "Line {}: missing expectation columns ({} of {} fields)",
                line,
                record.len(),
                INPUT_FIELDS
            );
        }
        return sample;
    }

    let raw_valid = field(4).unwrap_or_default();
    let valid = parse_bool(&raw_valid).unwrap_or_else(|| {
        tracing::warn!(
            "Line {}: cannot parse '{}' as boolean, treating as invalid",
            line,
            raw_valid
        );
        false
    });

    sample.with_expected(SampleExpected {
        section_id: parse_optional_id(&field(2).unwrap_or_default(), "section_id", line),
        row_id: parse_optional_id(&field(3).unwrap_or_default(), "row_id", line),
        valid,
    })
}

/// 空白代表沒有 ID；無法解析的值 (例如 -1) 同樣視為沒有 ID
fn parse_optional_id(raw: &str, column: &str, line: u64) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    match trimmed.parse::<u32>() {
        Ok(id) => Some(id),
        Err(_) => {
            if trimmed != "-1" {
                tracing::warn!(
                    "Line {}: '{}' in column {} is not an id, treating as absent",
                    line,
                    raw,
                    column
                );
            }
            None
        }
    }
}

/// 整數以非零為真，否則看第一個字母是 t 還是 f
pub fn parse_bool(raw: &str) -> Option<bool> {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(n != 0);
    }

    match trimmed.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('t') => Some(true),
        Some('f') => Some(false),
        _ => None,
    }
}

/// 每筆紀錄輸出一行 JSON
pub fn write_jsonl<W: Write>(mut writer: W, records: &[SampleRecord]) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
