use crate::utils::error::Result;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// JSONL 的輸出目的地：指定檔案或 stdout
#[derive(Debug, Clone, Default)]
pub struct LocalOutput {
    path: Option<PathBuf>,
}

impl LocalOutput {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn describe(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => "stdout".to_string(),
        }
    }

    pub fn open(&self) -> Result<Box<dyn Write>> {
        match &self.path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent)?;
                    }
                }
                Ok(Box::new(BufWriter::new(fs::File::create(path)?)))
            }
            None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out/result.jsonl");
        let output = LocalOutput::new(Some(path.clone()));

        {
            let mut writer = output.open().unwrap();
            writer.write_all(b"{}\n").unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
        assert_eq!(output.describe(), path.display().to_string());
    }

    #[test]
    fn test_default_is_stdout() {
        assert_eq!(LocalOutput::default().describe(), "stdout");
    }
}
