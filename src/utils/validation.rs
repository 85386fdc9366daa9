use crate::utils::error::{NormalizerError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let display = path.to_string_lossy();

    if display.is_empty() {
        return Err(NormalizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if display.contains('\0') {
        return Err(NormalizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_exists(field_name: &str, path: &Path) -> Result<()> {
    validate_path(field_name, path)?;

    if !path.is_file() {
        return Err(NormalizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.display().to_string(),
            reason: "File does not exist".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| NormalizerError::MissingConfigError {
        field: field_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("manifest", Path::new("manifest.csv")).is_ok());
        assert!(validate_path("manifest", Path::new("")).is_err());
        assert!(validate_path("manifest", Path::new("bad\0path")).is_err());
    }

    #[test]
    fn test_validate_file_exists() {
        let file = NamedTempFile::new().unwrap();
        assert!(validate_file_exists("input", file.path()).is_ok());

        let missing = PathBuf::from("/definitely/not/here.csv");
        assert!(validate_file_exists("input", &missing).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(1);
        let absent: Option<i32> = None;
        assert_eq!(*validate_required_field("x", &present).unwrap(), 1);
        assert!(matches!(
            validate_required_field("x", &absent),
            Err(NormalizerError::MissingConfigError { .. })
        ));
    }
}
