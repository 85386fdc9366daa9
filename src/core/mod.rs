pub mod engine;
pub mod grading;
pub mod manifest;
pub mod normalizer;
pub mod samples;

pub use crate::domain::model::{NormalizationResult, RunSummary, SampleRecord};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Resolver};
pub use crate::utils::error::Result;
