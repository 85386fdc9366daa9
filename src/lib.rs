pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::batch::BatchPipeline;
pub use config::{cli::LocalOutput, NormalizerConfig, RunMode};
pub use crate::core::{engine::NormalizeEngine, manifest::ManifestIndex, normalizer::Normalizer};
pub use domain::model::{GradeReport, ManifestEntry, NormalizationResult, SampleRecord};
pub use utils::error::{NormalizerError, Result};
