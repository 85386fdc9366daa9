use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizerError {
    #[error("Manifest not found or unreadable: {}", path.display())]
    ManifestNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed manifest at line {line}: {message}")]
    ManifestFormat { line: u64, message: String },

    #[error("Conflicting manifest entry at line {line}: {message}")]
    ManifestConflict { line: u64, message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Manifest,
    Input,
    Config,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 程式結束碼：輸入問題 2、清單或設定問題 1、系統問題 3
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl NormalizerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ManifestNotFound { .. }
            | Self::ManifestFormat { .. }
            | Self::ManifestConflict { .. } => ErrorCategory::Manifest,
            Self::CsvError(_) => ErrorCategory::Input,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Manifest | ErrorCategory::Config => ErrorSeverity::High,
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ManifestNotFound { path, .. } => {
                format!("Cannot open manifest file '{}'", path.display())
            }
            Self::ManifestFormat { line, .. } => {
                format!("Manifest line {} is malformed", line)
            }
            Self::ManifestConflict { line, .. } => {
                format!("Manifest line {} contradicts an earlier entry", line)
            }
            Self::CsvError(_) => "Input file could not be read as CSV".to_string(),
            Self::IoError(_) => "File system operation failed".to_string(),
            Self::SerializationError(_) => "Failed to write JSON output".to_string(),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::ConfigValidationError { field, .. }
            | Self::InvalidConfigValueError { field, .. } => {
                format!("Invalid configuration value for '{}'", field)
            }
            Self::MissingConfigError { field } => format!("Missing '{}'", field),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::ManifestNotFound { .. } => {
                "Check the --manifest path and file permissions".to_string()
            }
            Self::ManifestFormat { .. } => {
                "Each manifest line needs section_id,section_name,row_id,row_name with non-negative integer IDs".to_string()
            }
            Self::ManifestConflict { .. } => {
                "Remove or correct the duplicate section/row definition".to_string()
            }
            Self::CsvError(_) => "Make sure the input file is comma separated".to_string(),
            Self::IoError(_) => "Check that the output location is writable".to_string(),
            Self::SerializationError(_) => "Re-run with --verbose for details".to_string(),
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                "Check the TOML configuration file syntax".to_string()
            }
            Self::InvalidConfigValueError { reason, .. } => reason.clone(),
            Self::MissingConfigError { field } => match field.as_str() {
                "mode" => "Pass --input <FILE> or both --section and --row".to_string(),
                _ => format!("Provide '{}' on the command line or in --config", field),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, NormalizerError>;
