use crate::core::ConfigProvider;
use crate::domain::ports::{
    DEFAULT_GRADES_FILE, DEFAULT_INSTRUCTORS_FILE, DEFAULT_MAJORS_FILE, DEFAULT_STUDENTS_FILE,
};
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_name, validate_path, validate_separator, Validate};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "registrar")]
#[command(about = "Student, instructor and major summaries from tab-separated records")]
pub struct CliConfig {
    /// Directory holding the input files
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    #[arg(long, default_value = DEFAULT_STUDENTS_FILE)]
    pub students: String,

    #[arg(long, default_value = DEFAULT_INSTRUCTORS_FILE)]
    pub instructors: String,

    #[arg(long, default_value = DEFAULT_GRADES_FILE)]
    pub grades: String,

    #[arg(long, default_value = DEFAULT_MAJORS_FILE)]
    pub majors: String,

    /// Field separator, a single character
    #[arg(long, default_value = "\t")]
    pub separator: char,

    /// TOML configuration file; its [sources] replace the flags above
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log elapsed time and memory per phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            students: DEFAULT_STUDENTS_FILE.to_string(),
            instructors: DEFAULT_INSTRUCTORS_FILE.to_string(),
            grades: DEFAULT_GRADES_FILE.to_string(),
            majors: DEFAULT_MAJORS_FILE.to_string(),
            separator: '\t',
            config: None,
            verbose: false,
            monitor: false,
            json_logs: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn students_file(&self) -> &str {
        &self.students
    }

    fn instructors_file(&self) -> &str {
        &self.instructors
    }

    fn grades_file(&self) -> &str {
        &self.grades
    }

    fn majors_file(&self) -> &str {
        &self.majors
    }

    fn separator(&self) -> char {
        self.separator
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_dir", &self.data_dir)?;
        validate_file_name("students", &self.students)?;
        validate_file_name("instructors", &self.instructors)?;
        validate_file_name("grades", &self.grades)?;
        validate_file_name("majors", &self.majors)?;
        validate_separator("separator", self.separator)?;
        if let Some(config) = &self.config {
            validate_path("config", config)?;
        }
        Ok(())
    }
}
