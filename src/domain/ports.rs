use crate::domain::model::{RowId, RunSummary, SampleRecord, SectionId};
use crate::utils::error::Result;
use std::path::Path;

/// 名稱到 ID 的查詢介面；實作必須在建構後保持唯讀
pub trait Resolver: Send + Sync {
    fn resolve_section(&self, name: &str) -> Option<SectionId>;
    fn resolve_row(&self, section_name: &str, row_name: &str) -> Option<RowId>;
}

pub trait ConfigProvider: Send + Sync {
    fn manifest_path(&self) -> &Path;
    fn input_path(&self) -> Option<&Path>;
    fn output_path(&self) -> Option<&Path>;
    fn grade(&self) -> bool;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<SampleRecord>>;
    fn transform(&self, records: Vec<SampleRecord>) -> Result<Vec<SampleRecord>>;
    fn load(&self, records: &[SampleRecord]) -> Result<RunSummary>;
}
