use crate::core::reader::read_records;
use crate::domain::model::{Grade, Instructor, Major, RemainingElectives, Student};
use crate::domain::ports::SourcePaths;
use crate::domain::records::{GradeRecord, InstructorRecord, MajorRecord, StudentRecord};
use crate::utils::error::{RegistrarError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// What a single load phase did.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub rows: usize,
    /// Non-fatal cross-reference problems, one per skipped reference.
    pub warnings: Vec<RegistrarError>,
}

/// Students, instructors and majors, keyed by cwid / cwid / name.
#[derive(Debug, Clone)]
pub struct Repository {
    students: BTreeMap<String, Student>,
    instructors: BTreeMap<String, Instructor>,
    majors: BTreeMap<String, Major>,
    separator: char,
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository {
    pub fn new() -> Self {
        Self::with_separator(crate::domain::ports::DEFAULT_SEPARATOR)
    }

    pub fn with_separator(separator: char) -> Self {
        Self {
            students: BTreeMap::new(),
            instructors: BTreeMap::new(),
            majors: BTreeMap::new(),
            separator,
        }
    }

    /// Runs every load phase in order: students, instructors, grades, majors.
    /// Returns the repository together with all non-fatal warnings.
    pub fn load(sources: &SourcePaths) -> Result<(Self, Vec<RegistrarError>)> {
        let mut repository = Self::with_separator(sources.separator);
        let mut warnings = Vec::new();

        let students = repository.load_students(&sources.students)?;
        tracing::info!("Loaded {} student rows", students.rows);

        let instructors = repository.load_instructors(&sources.instructors)?;
        tracing::info!("Loaded {} instructor rows", instructors.rows);

        let grades = repository.load_grades(&sources.grades)?;
        tracing::info!(
            "Loaded {} grade rows ({} warnings)",
            grades.rows,
            grades.warnings.len()
        );
        warnings.extend(grades.warnings);

        let majors = repository.load_majors(&sources.majors)?;
        tracing::info!("Loaded {} major rows", majors.rows);

        Ok((repository, warnings))
    }

    /// Last row wins when a cwid repeats.
    pub fn load_students(&mut self, path: impl AsRef<Path>) -> Result<LoadOutcome> {
        let mut outcome = LoadOutcome::default();
        for record in read_records::<StudentRecord>(path, self.separator)? {
            let StudentRecord { cwid, name, major } = record?;
            if self.students.contains_key(&cwid) {
                tracing::debug!(cwid = %cwid, "Replacing duplicate student");
            }
            self.students
                .insert(cwid.clone(), Student::new(cwid, name, major));
            outcome.rows += 1;
        }
        Ok(outcome)
    }

    /// Last row wins when a cwid repeats.
    pub fn load_instructors(&mut self, path: impl AsRef<Path>) -> Result<LoadOutcome> {
        let mut outcome = LoadOutcome::default();
        for record in read_records::<InstructorRecord>(path, self.separator)? {
            let InstructorRecord { cwid, name, dept } = record?;
            if self.instructors.contains_key(&cwid) {
                tracing::debug!(cwid = %cwid, "Replacing duplicate instructor");
            }
            self.instructors
                .insert(cwid.clone(), Instructor::new(cwid, name, dept));
            outcome.rows += 1;
        }
        Ok(outcome)
    }

    /// Joins each grade to its student and its instructor independently; a dangling
    /// reference on one side does not stop the other side from being applied.
    pub fn load_grades(&mut self, path: impl AsRef<Path>) -> Result<LoadOutcome> {
        let mut outcome = LoadOutcome::default();
        for record in read_records::<GradeRecord>(path, self.separator)? {
            let GradeRecord {
                student_cwid,
                course,
                grade,
                instructor_cwid,
            } = record?;
            outcome.rows += 1;

            match self.students.get_mut(&student_cwid) {
                Some(student) => student.add_course(course.clone(), grade),
                None => {
                    tracing::warn!(
                        student_cwid = %student_cwid,
                        course = %course,
                        "Found grade for unknown student"
                    );
                    outcome.warnings.push(RegistrarError::UnknownStudent {
                        cwid: student_cwid,
                        course: course.clone(),
                    });
                }
            }

            match self.instructors.get_mut(&instructor_cwid) {
                Some(instructor) => {
                    instructor.add_student(&course);
                }
                None => {
                    tracing::warn!(
                        instructor_cwid = %instructor_cwid,
                        course = %course,
                        "Found grade for unknown instructor"
                    );
                    outcome.warnings.push(RegistrarError::UnknownInstructor {
                        cwid: instructor_cwid,
                        course,
                    });
                }
            }
        }
        Ok(outcome)
    }

    pub fn load_majors(&mut self, path: impl AsRef<Path>) -> Result<LoadOutcome> {
        let mut outcome = LoadOutcome::default();
        for record in read_records::<MajorRecord>(path, self.separator)? {
            let MajorRecord {
                major,
                kind,
                course,
            } = record?;
            self.majors
                .entry(major)
                .or_insert_with_key(|name| Major::new(name.clone()))
                .add_course(kind, course);
            outcome.rows += 1;
        }
        Ok(outcome)
    }

    /// Annotates every student with completed, remaining required and remaining
    /// elective courses. Depends only on the current collections, so running it
    /// again gives the same result.
    pub fn compute_remaining(&mut self) {
        let majors = &self.majors;
        for student in self.students.values_mut() {
            let major = majors.get(&student.major);
            if major.is_none() {
                tracing::debug!(
                    cwid = %student.cwid,
                    major = %student.major,
                    "Student major not found, treating requirements as empty"
                );
            }

            let (completed, required, electives) = degree_progress(student.courses(), major);
            student.set_progress(completed, required, electives);
        }
    }

    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    pub fn instructors(&self) -> impl Iterator<Item = &Instructor> {
        self.instructors.values()
    }

    pub fn majors(&self) -> impl Iterator<Item = &Major> {
        self.majors.values()
    }

    pub fn student(&self, cwid: &str) -> Option<&Student> {
        self.students.get(cwid)
    }

    pub fn instructor(&self, cwid: &str) -> Option<&Instructor> {
        self.instructors.get(cwid)
    }

    pub fn major(&self, name: &str) -> Option<&Major> {
        self.majors.get(name)
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn instructor_count(&self) -> usize {
        self.instructors.len()
    }

    pub fn major_count(&self) -> usize {
        self.majors.len()
    }
}

fn degree_progress(
    courses: &BTreeMap<String, Grade>,
    major: Option<&Major>,
) -> (BTreeMap<String, Grade>, BTreeSet<String>, RemainingElectives) {
    let completed: BTreeMap<String, Grade> = courses
        .iter()
        .filter(|(_, grade)| grade.is_passing())
        .map(|(course, grade)| (course.clone(), grade.clone()))
        .collect();

    let (required, electives) = match major {
        Some(major) => (major.required_courses(), major.elective_courses()),
        None => (&[][..], &[][..]),
    };

    let remaining_required: BTreeSet<String> = required
        .iter()
        .filter(|course| !completed.contains_key(*course))
        .cloned()
        .collect();

    let outstanding: BTreeSet<String> = electives
        .iter()
        .filter(|course| !completed.contains_key(*course))
        .cloned()
        .collect();

    // 剩餘選修數少於選修總數 (含重複列出) 即視為滿足
    let remaining_electives = if outstanding.len() < electives.len() {
        RemainingElectives::Satisfied
    } else {
        RemainingElectives::Outstanding(outstanding)
    };

    (completed, remaining_required, remaining_electives)
}
