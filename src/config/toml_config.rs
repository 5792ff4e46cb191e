use crate::core::ConfigProvider;
use crate::domain::ports::{
    DEFAULT_GRADES_FILE, DEFAULT_INSTRUCTORS_FILE, DEFAULT_MAJORS_FILE, DEFAULT_SEPARATOR,
    DEFAULT_STUDENTS_FILE,
};
use crate::utils::error::{RegistrarError, Result};
use crate::utils::validation::{validate_file_name, validate_path, validate_separator, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub sources: SourcesConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_students")]
    pub students: String,
    #[serde(default = "default_instructors")]
    pub instructors: String,
    #[serde(default = "default_grades")]
    pub grades: String,
    #[serde(default = "default_majors")]
    pub majors: String,
    #[serde(default = "default_separator")]
    pub separator: char,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            students: default_students(),
            instructors: default_instructors(),
            grades: default_grades(),
            majors: default_majors(),
            separator: default_separator(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_students() -> String {
    DEFAULT_STUDENTS_FILE.to_string()
}

fn default_instructors() -> String {
    DEFAULT_INSTRUCTORS_FILE.to_string()
}

fn default_grades() -> String {
    DEFAULT_GRADES_FILE.to_string()
}

fn default_majors() -> String {
    DEFAULT_MAJORS_FILE.to_string()
}

fn default_separator() -> char {
    DEFAULT_SEPARATOR
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RegistrarError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RegistrarError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RegistrarError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    /// 取得監控設定
    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn data_dir(&self) -> &Path {
        &self.sources.data_dir
    }

    fn students_file(&self) -> &str {
        &self.sources.students
    }

    fn instructors_file(&self) -> &str {
        &self.sources.instructors
    }

    fn grades_file(&self) -> &str {
        &self.sources.grades
    }

    fn majors_file(&self) -> &str {
        &self.sources.majors
    }

    fn separator(&self) -> char {
        self.sources.separator
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("sources.data_dir", &self.sources.data_dir)?;
        validate_file_name("sources.students", &self.sources.students)?;
        validate_file_name("sources.instructors", &self.sources.instructors)?;
        validate_file_name("sources.grades", &self.sources.grades)?;
        validate_file_name("sources.majors", &self.sources.majors)?;
        validate_separator("sources.separator", self.sources.separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_sources() {
        let toml_content = r#"
[sources]
data_dir = "./data"
grades = "grades_2024.txt"
separator = "|"

[monitoring]
enabled = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.data_dir(), Path::new("./data"));
        assert_eq!(config.grades_file(), "grades_2024.txt");
        assert_eq!(config.students_file(), "students.txt");
        assert_eq!(config.separator(), '|');
        assert!(config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.data_dir(), Path::new("."));
        assert_eq!(config.majors_file(), "majors.txt");
        assert_eq!(config.separator(), '\t');
        assert!(!config.monitoring_enabled());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("REGISTRAR_TEST_DATA_DIR", "/srv/registrar");

        let toml_content = r#"
[sources]
data_dir = "${REGISTRAR_TEST_DATA_DIR}"
students = "${REGISTRAR_TEST_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data_dir(), Path::new("/srv/registrar"));
        assert_eq!(config.students_file(), "${REGISTRAR_TEST_UNSET_VARIABLE}");

        std::env::remove_var("REGISTRAR_TEST_DATA_DIR");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[sources]
majors = "  "
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[sources\nseparator = ").unwrap_err();
        assert!(matches!(err, RegistrarError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[sources]\ndata_dir = \"fixtures\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.data_dir(), Path::new("fixtures"));
    }
}
