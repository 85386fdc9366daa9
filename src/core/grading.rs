use crate::domain::model::{GradeReport, SampleRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Correct,
    /// 應為有效卻被標為無效
    Missed,
    /// 標為有效但 ID 錯誤，或應為無效卻被標為有效
    Wrong,
}

impl Grade {
    pub fn points(self) -> i64 {
        match self {
            Grade::Correct => 1,
            Grade::Missed => 0,
            Grade::Wrong => -5,
        }
    }
}

/// 沒有預期值的紀錄不評分
pub fn grade_record(record: &SampleRecord) -> Option<Grade> {
    let expected = record.expected?;
    let output = &record.output;

    let grade = if expected.valid {
        if !output.valid {
            Grade::Missed
        } else if expected.section_id == output.section_id && expected.row_id == output.row_id {
            Grade::Correct
        } else {
            Grade::Wrong
        }
    } else if output.valid {
        Grade::Wrong
    } else {
        Grade::Correct
    };

    if grade != Grade::Correct {
        tracing::debug!(
            "{}:{} graded {:?}: output {:?}:{:?} valid={}, expected {:?}:{:?} valid={}",
            record.input.section,
            record.input.row,
            grade,
            output.section_id,
            output.row_id,
            output.valid,
            expected.section_id,
            expected.row_id,
            expected.valid
        );
    }

    Some(grade)
}

impl GradeReport {
    pub fn from_records(records: &[SampleRecord]) -> Self {
        let mut report = Self::default();
        for grade in records.iter().filter_map(grade_record) {
            report.score += grade.points();
            report.max += 1;
            match grade {
                Grade::Correct => report.correct += 1,
                Grade::Missed => report.missed += 1,
                Grade::Wrong => report.wrong += 1,
            }
        }
        report
    }
}

/// 輸出與預期不完全相同的紀錄
pub fn mismatches(records: &[SampleRecord]) -> Vec<&SampleRecord> {
    records
        .iter()
        .filter(|r| r.matches_expected() == Some(false))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{NormalizationResult, SampleExpected};

    fn graded(
        expected: (Option<u32>, Option<u32>, bool),
        output: (Option<u32>, Option<u32>, bool),
    ) -> SampleRecord {
        let mut record = SampleRecord::new("s", "r").with_expected(SampleExpected {
            section_id: expected.0,
            row_id: expected.1,
            valid: expected.2,
        });
        record.output = NormalizationResult {
            section_id: output.0,
            row_id: output.1,
            valid: output.2,
        };
        record
    }

    #[test]
    fn test_expected_valid_cases() {
        let ok = graded((Some(1), Some(10), true), (Some(1), Some(10), true));
        assert_eq!(grade_record(&ok), Some(Grade::Correct));

        let missed = graded((Some(1), Some(10), true), (Some(1), None, false));
        assert_eq!(grade_record(&missed), Some(Grade::Missed));

        let wrong = graded((Some(1), Some(10), true), (Some(1), Some(11), true));
        assert_eq!(grade_record(&wrong), Some(Grade::Wrong));
    }

    #[test]
    fn test_expected_invalid_cases() {
        // 無效時不比對 ID
        let ok = graded((None, None, false), (Some(1), None, false));
        assert_eq!(grade_record(&ok), Some(Grade::Correct));

        let wrong = graded((None, None, false), (Some(1), Some(10), true));
        assert_eq!(grade_record(&wrong), Some(Grade::Wrong));
    }

    #[test]
    fn test_report_and_mismatches() {
        let records = vec![
            graded((Some(1), Some(10), true), (Some(1), Some(10), true)),
            graded((Some(1), Some(10), true), (None, None, false)),
            graded((None, None, false), (Some(2), Some(3), true)),
            SampleRecord::new("ungraded", "row"),
        ];

        let report = GradeReport::from_records(&records);
        assert_eq!(
            report,
            GradeReport {
                score: -4,
                max: 3,
                correct: 1,
                missed: 1,
                wrong: 1
            }
        );
        assert_eq!(report.to_string(), "-4 / 3 (correct: 1, missed: 1, wrong: 1)");
        assert_eq!(mismatches(&records).len(), 2);
    }
}
