use crate::core::repository::Repository;
use crate::utils::error::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_STUDENTS_FILE: &str = "students.txt";
pub const DEFAULT_INSTRUCTORS_FILE: &str = "instructors.txt";
pub const DEFAULT_GRADES_FILE: &str = "grades.txt";
pub const DEFAULT_MAJORS_FILE: &str = "majors.txt";
pub const DEFAULT_SEPARATOR: char = '\t';

/// Fully resolved locations of the four input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub students: PathBuf,
    pub instructors: PathBuf,
    pub grades: PathBuf,
    pub majors: PathBuf,
    pub separator: char,
}

impl SourcePaths {
    /// Default file names inside `dir`, tab separated.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            students: dir.join(DEFAULT_STUDENTS_FILE),
            instructors: dir.join(DEFAULT_INSTRUCTORS_FILE),
            grades: dir.join(DEFAULT_GRADES_FILE),
            majors: dir.join(DEFAULT_MAJORS_FILE),
            separator: DEFAULT_SEPARATOR,
        }
    }
}

pub trait ConfigProvider {
    fn data_dir(&self) -> &Path;
    fn students_file(&self) -> &str;
    fn instructors_file(&self) -> &str;
    fn grades_file(&self) -> &str;
    fn majors_file(&self) -> &str;
    fn separator(&self) -> char;

    fn source_paths(&self) -> SourcePaths {
        let dir = self.data_dir();
        SourcePaths {
            students: dir.join(self.students_file()),
            instructors: dir.join(self.instructors_file()),
            grades: dir.join(self.grades_file()),
            majors: dir.join(self.majors_file()),
            separator: self.separator(),
        }
    }
}

pub trait Pipeline {
    fn extract(&self) -> Result<Repository>;
    fn transform(&self, repository: Repository) -> Result<Repository>;
    fn load<W: Write>(&self, repository: &Repository, out: &mut W) -> Result<()>;
}
