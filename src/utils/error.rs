use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistrarError {
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("IO error on {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Malformed record in {} at line {line}: expected {expected} fields, found {found}",
        path.display()
    )]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Found grade for unknown student '{cwid}' in course '{course}'")]
    UnknownStudent { cwid: String, course: String },

    #[error("Found grade for unknown instructor '{cwid}' in course '{course}'")]
    UnknownInstructor { cwid: String, course: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to write report: {0}")]
    OutputError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Reference,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RegistrarError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileNotFound { .. } | Self::IoError { .. } => ErrorCategory::Input,
            Self::MalformedRecord { .. } => ErrorCategory::Data,
            Self::UnknownStudent { .. } | Self::UnknownInstructor { .. } => {
                ErrorCategory::Reference
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::OutputError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownStudent { .. } | Self::UnknownInstructor { .. } => ErrorSeverity::Low,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorSeverity::Medium
            }
            Self::MalformedRecord { .. } => ErrorSeverity::High,
            Self::FileNotFound { .. } | Self::IoError { .. } | Self::OutputError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    /// Dangling grade references are reported but never abort a run.
    pub fn is_fatal(&self) -> bool {
        self.severity() > ErrorSeverity::Low
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::FileNotFound { path } => format!(
                "Check that '{}' exists or point --data-dir at the directory holding it",
                path.display()
            ),
            Self::IoError { path, .. } => {
                format!("Check read permissions and encoding of '{}'", path.display())
            }
            Self::MalformedRecord { line, expected, .. } => format!(
                "Fix line {} so it has exactly {} separator-delimited fields",
                line, expected
            ),
            Self::UnknownStudent { cwid, .. } => {
                format!("Add student '{}' to the students file", cwid)
            }
            Self::UnknownInstructor { cwid, .. } => {
                format!("Add instructor '{}' to the instructors file", cwid)
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the command line flags and the TOML configuration file".to_string()
            }
            Self::OutputError(_) => "Check that standard output is writable".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Could not read input: {}", self),
            ErrorCategory::Data => format!("Input data is malformed: {}", self),
            ErrorCategory::Reference => format!("Warning: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Output => format!("Could not write the report: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistrarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_record_message_names_line() {
        let err = RegistrarError::MalformedRecord {
            path: PathBuf::from("grades.txt"),
            line: 7,
            expected: 4,
            found: 3,
        };

        assert_eq!(
            err.to_string(),
            "Malformed record in grades.txt at line 7: expected 4 fields, found 3"
        );
        assert_eq!(err.category(), ErrorCategory::Data);
        assert!(err.is_fatal());
    }

    #[test]
    fn test_unknown_references_are_not_fatal() {
        let student = RegistrarError::UnknownStudent {
            cwid: "99999".to_string(),
            course: "SSW 540".to_string(),
        };
        let instructor = RegistrarError::UnknownInstructor {
            cwid: "11111".to_string(),
            course: "SSW 540".to_string(),
        };

        assert_eq!(student.severity(), ErrorSeverity::Low);
        assert!(!student.is_fatal());
        assert!(!instructor.is_fatal());
        assert!(student.user_friendly_message().starts_with("Warning:"));
    }

    #[test]
    fn test_missing_file_is_critical() {
        let err = RegistrarError::FileNotFound {
            path: PathBuf::from("students.txt"),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.recovery_suggestion().contains("students.txt"));
    }
}
