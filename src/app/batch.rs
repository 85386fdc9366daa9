use crate::config::cli::LocalOutput;
use crate::core::manifest::ManifestIndex;
use crate::core::normalizer::Normalizer;
use crate::core::grading::mismatches;
use crate::core::samples::{read_samples, write_jsonl};
use crate::core::{ConfigProvider, Pipeline, Resolver, Result, RunSummary, SampleRecord};
use crate::domain::model::GradeReport;
use crate::utils::validation::{validate_file_exists, validate_required_field};

/// 批次模式：讀取輸入 CSV、逐筆正規化、輸出 JSONL
pub struct BatchPipeline<C: ConfigProvider, R: Resolver = ManifestIndex> {
    pub(crate) config: C,
    pub(crate) normalizer: Normalizer<R>,
    pub(crate) output: LocalOutput,
}

impl<C: ConfigProvider, R: Resolver> BatchPipeline<C, R> {
    pub fn new(config: C, normalizer: Normalizer<R>) -> Self {
        let output = LocalOutput::new(config.output_path().map(|p| p.to_path_buf()));
        Self {
            config,
            normalizer,
            output,
        }
    }
}

impl<C: ConfigProvider, R: Resolver> Pipeline for BatchPipeline<C, R> {
    fn extract(&self) -> Result<Vec<SampleRecord>> {
        let input = self.config.input_path().map(|p| p.to_path_buf());
        let input = validate_required_field("input", &input)?;
        validate_file_exists("input", input)?;
        read_samples(input)
    }

    fn transform(&self, records: Vec<SampleRecord>) -> Result<Vec<SampleRecord>> {
        Ok(self.normalizer.normalize_all(records))
    }

    fn load(&self, records: &[SampleRecord]) -> Result<RunSummary> {
        let writer = self.output.open()?;
        write_jsonl(writer, records)?;

        let grade = if self.config.grade() {
            let report = GradeReport::from_records(records);
            tracing::debug!(
                "{} records differ from their expectation",
                mismatches(records).len()
            );
            tracing::info!("🎯 Score: {}", report);
            Some(report)
        } else {
            None
        };

        Ok(RunSummary {
            records: records.len(),
            valid: records.iter().filter(|r| r.output.valid).count(),
            destination: self.output.describe(),
            grade,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalizerConfig;
    use crate::core::engine::NormalizeEngine;
    use crate::domain::model::ManifestEntry;
    use crate::utils::error::NormalizerError;
    use tempfile::TempDir;

    fn normalizer() -> Normalizer {
        Normalizer::new(
            ManifestIndex::from_entries(vec![
                ManifestEntry::new(1, "Intro", 10, "Overview"),
                ManifestEntry::new(1, "Intro", 11, "Details"),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_batch_pipeline_writes_jsonl_and_grades() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input.csv");
        let output = dir.path().join("out/result.jsonl");
        std::fs::write(
            &input,
            "section,row,section_id,row_id,valid\nIntro,Overview,1,10,true\nIntro,Summary,,,false\nOutro,Overview,,,true\n",
        )
        .unwrap();

        let config = NormalizerConfig::new("unused.csv")
            .with_input(&input)
            .with_output(&output)
            .with_grade(true);
        let engine = NormalizeEngine::new(BatchPipeline::new(config, normalizer()));
        let summary = engine.run().unwrap();

        assert_eq!(summary.records, 3);
        assert_eq!(summary.valid, 1);
        let grade = summary.grade.unwrap();
        assert_eq!(grade.correct, 2);
        assert_eq!(grade.missed, 1);

        let text = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["output"]["row_id"], 10);
        assert_eq!(lines[1]["output"]["section_id"], 1);
        assert!(lines[1]["output"]["row_id"].is_null());
        assert_eq!(lines[2]["input"]["section"], "Outro");
    }

    #[test]
    fn test_extract_with_missing_input_file_is_invalid_config() {
        let dir = TempDir::new().unwrap();
        let config = NormalizerConfig::new("m.csv").with_input(dir.path().join("gone.csv"));
        let pipeline = BatchPipeline::new(config, normalizer());

        assert!(matches!(
            pipeline.extract(),
            Err(NormalizerError::InvalidConfigValueError { ref field, .. }) if field == "input"
        ));
    }

    #[test]
    fn test_extract_without_input_is_missing_config() {
        let pipeline = BatchPipeline::new(NormalizerConfig::new("m.csv"), normalizer());
        assert!(matches!(
            pipeline.extract(),
            Err(NormalizerError::MissingConfigError { .. })
        ));
    }
}
