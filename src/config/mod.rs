pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::{NormalizerError, Result};
use crate::utils::validation::{validate_path, Validate};
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "normalize")]
#[command(about = "Normalize raw section/row names against a venue manifest")]
pub struct CliConfig {
    /// Manifest CSV with section_id,section_name,row_id,row_name columns
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Batch input CSV with section,row,section_id,row_id,valid columns
    #[arg(long)]
    pub input: Option<PathBuf>,

    #[arg(long)]
    pub section: Option<String>,

    #[arg(long)]
    pub row: Option<String>,

    /// Write JSON lines here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// TOML configuration file; command line values take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Print a score against the expected columns to stderr")]
    pub grade: bool,

    #[arg(long, help = "Print the single-pair result as JSON")]
    pub json: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 合併設定檔與命令列參數
    pub fn resolve(&self) -> Result<NormalizerConfig> {
        let file_config = match &self.config {
            Some(path) => Some(toml_config::TomlConfig::from_file(path)?.into_config()),
            None => None,
        };

        let manifest_path = self
            .manifest
            .clone()
            .or_else(|| file_config.as_ref().map(|c| c.manifest_path.clone()))
            .ok_or_else(|| NormalizerError::MissingConfigError {
                field: "manifest".to_string(),
            })?;

        let file_config = file_config.unwrap_or_else(|| NormalizerConfig::new(&manifest_path));

        Ok(NormalizerConfig {
            manifest_path,
            input_path: self.input.clone().or(file_config.input_path),
            output_path: self.output.clone().or(file_config.output_path),
            grade: self.grade || file_config.grade,
            verbose: self.verbose || file_config.verbose,
            json_logs: self.log_json || file_config.json_logs,
        })
    }

    /// section 與 row 同時給定時走單筆模式，否則需要批次輸入檔
    pub fn mode(&self, config: &NormalizerConfig) -> Result<RunMode> {
        if let (Some(section), Some(row)) = (&self.section, &self.row) {
            return Ok(RunMode::Single {
                section: section.clone(),
                row: row.clone(),
            });
        }

        if config.input_path.is_some() {
            return Ok(RunMode::Batch);
        }

        Err(NormalizerError::MissingConfigError {
            field: "mode".to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    Batch,
    Single { section: String, row: String },
}

/// 解析完成、不再變動的執行設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerConfig {
    pub manifest_path: PathBuf,
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub grade: bool,
    pub verbose: bool,
    pub json_logs: bool,
}

impl NormalizerConfig {
    pub fn new(manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
            input_path: None,
            output_path: None,
            grade: false,
            verbose: false,
            json_logs: false,
        }
    }

    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn with_grade(mut self, grade: bool) -> Self {
        self.grade = grade;
        self
    }
}

impl ConfigProvider for NormalizerConfig {
    fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    fn input_path(&self) -> Option<&Path> {
        self.input_path.as_deref()
    }

    fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    fn grade(&self) -> bool {
        self.grade
    }
}

impl Validate for NormalizerConfig {
    // 只檢查路徑格式；manifest 是否存在由載入時回報，輸入檔只在批次模式讀取時檢查
    fn validate(&self) -> Result<()> {
        validate_path("manifest", &self.manifest_path)?;

        if let Some(input) = &self.input_path {
            validate_path("input", input)?;
        }

        if let Some(output) = &self.output_path {
            validate_path("output", output)?;
        }

        Ok(())
    }
}
