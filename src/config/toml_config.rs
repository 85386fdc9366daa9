use crate::config::NormalizerConfig;
use crate::utils::error::{NormalizerError, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    pub manifest: ManifestConfig,
    pub input: Option<InputConfig>,
    pub output: Option<OutputConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub path: Option<PathBuf>,
    pub grade: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置，相對路徑以設定檔所在目錄為準
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| NormalizerError::ConfigError {
            message: format!("cannot read '{}': {}", path.display(), e),
        })?;

        let mut config = Self::from_toml_str(&content)?;
        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        Ok(config)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| NormalizerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| NormalizerError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn rebase(&mut self, base: &Path) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };

        join(&mut self.manifest.path);
        if let Some(input) = self.input.as_mut() {
            join(&mut input.path);
        }
        if let Some(path) = self.output.as_mut().and_then(|o| o.path.as_mut()) {
            join(path);
        }
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn into_config(self) -> NormalizerConfig {
        let verbose = self.verbose();
        let json_logs = self.json_logs();
        let (output_path, grade) = match self.output {
            Some(output) => (output.path, output.grade.unwrap_or(false)),
            None => (None, false),
        };

        NormalizerConfig {
            manifest_path: self.manifest.path,
            input_path: self.input.map(|i| i.path),
            output_path,
            grade,
            verbose,
            json_logs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[manifest]
path = "/data/fenway.csv"

[input]
path = "/data/redsox.csv"

[output]
path = "/tmp/out.jsonl"
grade = true

[logging]
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap().into_config();

        assert_eq!(config.manifest_path, PathBuf::from("/data/fenway.csv"));
        assert_eq!(config.input_path, Some(PathBuf::from("/data/redsox.csv")));
        assert_eq!(config.output_path, Some(PathBuf::from("/tmp/out.jsonl")));
        assert!(config.grade);
        assert!(config.verbose);
        assert!(!config.json_logs);
    }

    #[test]
    fn test_manifest_section_is_required() {
        let err = TomlConfig::from_toml_str("[input]\npath = \"a.csv\"\n").unwrap_err();
        assert!(matches!(err, NormalizerError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SECTION_NORMALIZER_TEST_DIR", "/venues");

        let toml_content = r#"
[manifest]
path = "${SECTION_NORMALIZER_TEST_DIR}/citifield.csv"

[input]
path = "${SECTION_NORMALIZER_UNSET_VAR}/mets.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.manifest.path, PathBuf::from("/venues/citifield.csv"));
        assert_eq!(
            config.input.unwrap().path,
            PathBuf::from("${SECTION_NORMALIZER_UNSET_VAR}/mets.csv")
        );

        std::env::remove_var("SECTION_NORMALIZER_TEST_DIR");
    }

    #[test]
    fn test_relative_paths_follow_config_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("normalize.toml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        file.write_all(b"[manifest]\npath = \"manifests/dodgers.csv\"\n\n[output]\npath = \"/abs/out.jsonl\"\n")
            .unwrap();

        let config = TomlConfig::from_file(&config_path).unwrap();
        assert_eq!(
            config.manifest.path,
            dir.path().join("manifests/dodgers.csv")
        );
        assert_eq!(
            config.output.unwrap().path,
            Some(PathBuf::from("/abs/out.jsonl"))
        );
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = TomlConfig::from_file("/no/such/normalize.toml").unwrap_err();
        assert!(matches!(err, NormalizerError::ConfigError { .. }));
    }
}
