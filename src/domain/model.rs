use serde::{Deserialize, Serialize};

pub type SectionId = u32;
pub type RowId = u32;

/// 清單中的一筆 (section, row) 定義，載入後不可變
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub section_id: SectionId,
    pub section_name: String,
    pub row_id: RowId,
    pub row_name: String,
}

impl ManifestEntry {
    pub fn new(
        section_id: SectionId,
        section_name: impl Into<String>,
        row_id: RowId,
        row_name: impl Into<String>,
    ) -> Self {
        Self {
            section_id,
            section_name: section_name.into(),
            row_id,
            row_name: row_name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationResult {
    pub section_id: Option<SectionId>,
    pub row_id: Option<RowId>,
    pub valid: bool,
}

impl NormalizationResult {
    pub fn invalid() -> Self {
        Self::default()
    }

    pub fn resolved(section_id: Option<SectionId>, row_id: Option<RowId>) -> Self {
        Self {
            section_id,
            row_id,
            valid: section_id.is_some() && row_id.is_some(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleInput {
    pub section: String,
    pub row: String,
}

/// 測試資料中的預期結果，與輸出比對用
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleExpected {
    pub section_id: Option<SectionId>,
    pub row_id: Option<RowId>,
    pub valid: bool,
}

pub type SampleOutput = NormalizationResult;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub input: SampleInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<SampleExpected>,
    #[serde(default)]
    pub output: SampleOutput,
}

impl SampleRecord {
    pub fn new(section: impl Into<String>, row: impl Into<String>) -> Self {
        Self {
            input: SampleInput {
                section: section.into(),
                row: row.into(),
            },
            expected: None,
            output: SampleOutput::default(),
        }
    }

    pub fn with_expected(mut self, expected: SampleExpected) -> Self {
        self.expected = Some(expected);
        self
    }

    /// 輸出是否與預期完全一致；沒有預期值時回傳 None
    pub fn matches_expected(&self) -> Option<bool> {
        self.expected.map(|e| {
            e.section_id == self.output.section_id
                && e.row_id == self.output.row_id
                && e.valid == self.output.valid
        })
    }
}

/// 批次執行結束後的摘要
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub valid: usize,
    pub destination: String,
    pub grade: Option<GradeReport>,
}

/// 與預期值比對後的分數
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeReport {
    pub score: i64,
    pub max: usize,
    pub correct: usize,
    pub missed: usize,
    pub wrong: usize,
}

impl std::fmt::Display for GradeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} / {} (correct: {}, missed: {}, wrong: {})",
            self.score, self.max, self.correct, self.missed, self.wrong
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_requires_both_ids() {
        assert!(NormalizationResult::resolved(Some(1), Some(10)).valid);
        assert!(!NormalizationResult::resolved(Some(1), None).valid);
        assert!(!NormalizationResult::resolved(None, Some(10)).valid);
    }

    #[test]
    fn test_sample_record_serializes_snake_case_with_nulls() {
        let mut record = SampleRecord::new("Intro", "Summary").with_expected(SampleExpected {
            section_id: Some(1),
            row_id: None,
            valid: false,
        });
        record.output = NormalizationResult::resolved(Some(1), None);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "input": {"section": "Intro", "row": "Summary"},
                "expected": {"section_id": 1, "row_id": null, "valid": false},
                "output": {"section_id": 1, "row_id": null, "valid": false}
            })
        );
    }

    #[test]
    fn test_missing_expectation_is_omitted() {
        let record = SampleRecord::new("Intro", "Overview");
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("expected").is_none());
        assert_eq!(record.matches_expected(), None);
    }
}
