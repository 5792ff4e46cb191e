use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Grades that count a course as completed. Matching is exact and case-sensitive.
pub const PASSING_GRADES: [&str; 7] = ["A", "A-", "B+", "B", "B-", "C+", "C"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade(String);

impl Grade {
    pub fn new(grade: impl Into<String>) -> Self {
        Self(grade.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_passing(&self) -> bool {
        PASSING_GRADES.contains(&self.0.as_str())
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Electives are an any-one-of requirement.
///
/// `Satisfied` is reported when fewer distinct electives remain than the major
/// lists (duplicates included), which normally means one was completed. It is
/// distinct from `Outstanding` with an empty set, which only happens for a major
/// that lists no electives at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemainingElectives {
    Satisfied,
    Outstanding(BTreeSet<String>),
}

impl RemainingElectives {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Self::Satisfied)
    }

    pub fn outstanding(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::Satisfied => None,
            Self::Outstanding(courses) => Some(courses),
        }
    }
}

impl Default for RemainingElectives {
    fn default() -> Self {
        Self::Outstanding(BTreeSet::new())
    }
}

#[derive(Debug, Clone)]
pub struct Student {
    pub cwid: String,
    pub name: String,
    pub major: String,
    courses: BTreeMap<String, Grade>,
    completed_courses: BTreeMap<String, Grade>,
    remaining_required: BTreeSet<String>,
    remaining_electives: RemainingElectives,
}

impl Student {
    pub fn new(
        cwid: impl Into<String>,
        name: impl Into<String>,
        major: impl Into<String>,
    ) -> Self {
        Self {
            cwid: cwid.into(),
            name: name.into(),
            major: major.into(),
            courses: BTreeMap::new(),
            completed_courses: BTreeMap::new(),
            remaining_required: BTreeSet::new(),
            remaining_electives: RemainingElectives::default(),
        }
    }

    /// Records a grade; a later attempt at the same course replaces the earlier one.
    pub fn add_course(&mut self, course: impl Into<String>, grade: Grade) {
        self.courses.insert(course.into(), grade);
    }

    pub fn courses(&self) -> &BTreeMap<String, Grade> {
        &self.courses
    }

    pub fn completed_courses(&self) -> &BTreeMap<String, Grade> {
        &self.completed_courses
    }

    pub fn remaining_required(&self) -> &BTreeSet<String> {
        &self.remaining_required
    }

    pub fn remaining_electives(&self) -> &RemainingElectives {
        &self.remaining_electives
    }

    /// Completed course codes in sorted order.
    pub fn completed_course_codes(&self) -> Vec<&str> {
        self.completed_courses.keys().map(String::as_str).collect()
    }

    pub(crate) fn set_progress(
        &mut self,
        completed_courses: BTreeMap<String, Grade>,
        remaining_required: BTreeSet<String>,
        remaining_electives: RemainingElectives,
    ) {
        self.completed_courses = completed_courses;
        self.remaining_required = remaining_required;
        self.remaining_electives = remaining_electives;
    }
}

/// Number of grade records per course.
///
/// A course that was never counted reads as zero; the only way to create an entry is
/// [`CourseTally::increment`], so stored counts are always at least one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseTally(BTreeMap<String, usize>);

impl CourseTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the course with a count of one, or bumps the existing count.
    /// Returns the new count.
    pub fn increment(&mut self, course: &str) -> usize {
        let count = self.0.entry(course.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn count(&self, course: &str) -> usize {
        self.0.get(course).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(course, count)| (course.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Instructor {
    pub cwid: String,
    pub name: String,
    pub dept: String,
    courses: CourseTally,
}

impl Instructor {
    pub fn new(cwid: impl Into<String>, name: impl Into<String>, dept: impl Into<String>) -> Self {
        Self {
            cwid: cwid.into(),
            name: name.into(),
            dept: dept.into(),
            courses: CourseTally::new(),
        }
    }

    pub fn add_student(&mut self, course: &str) -> usize {
        self.courses.increment(course)
    }

    pub fn courses(&self) -> &CourseTally {
        &self.courses
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseKind {
    Required,
    Elective,
}

impl CourseKind {
    /// `R` marks a required course; every other flag is treated as an elective.
    pub fn from_flag(flag: &str) -> Self {
        if flag == "R" {
            Self::Required
        } else {
            Self::Elective
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Major {
    pub name: String,
    required_courses: Vec<String>,
    elective_courses: Vec<String>,
}

impl Major {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required_courses: Vec::new(),
            elective_courses: Vec::new(),
        }
    }

    /// Appends without deduplicating so the listing mirrors the source file.
    pub fn add_course(&mut self, kind: CourseKind, course: impl Into<String>) {
        match kind {
            CourseKind::Required => self.required_courses.push(course.into()),
            CourseKind::Elective => self.elective_courses.push(course.into()),
        }
    }

    pub fn required_courses(&self) -> &[String] {
        &self.required_courses
    }

    pub fn elective_courses(&self) -> &[String] {
        &self.elective_courses
    }
}
