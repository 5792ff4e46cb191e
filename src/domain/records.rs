//! Typed rows, one per input file kind.
//!
//! The line reader checks the column count against [`FromFields::ARITY`] before a
//! record is built, so `from_fields` always receives exactly that many fields.

use crate::domain::model::{CourseKind, Grade};

pub trait FromFields: Sized {
    const ARITY: usize;

    fn from_fields(fields: Vec<String>) -> Self;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub cwid: String,
    pub name: String,
    pub major: String,
}

impl FromFields for StudentRecord {
    const ARITY: usize = 3;

    fn from_fields(fields: Vec<String>) -> Self {
        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        Self {
            cwid: next(),
            name: next(),
            major: next(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructorRecord {
    pub cwid: String,
    pub name: String,
    pub dept: String,
}

impl FromFields for InstructorRecord {
    const ARITY: usize = 3;

    fn from_fields(fields: Vec<String>) -> Self {
        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        Self {
            cwid: next(),
            name: next(),
            dept: next(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeRecord {
    pub student_cwid: String,
    pub course: String,
    pub grade: Grade,
    pub instructor_cwid: String,
}

impl FromFields for GradeRecord {
    const ARITY: usize = 4;

    fn from_fields(fields: Vec<String>) -> Self {
        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        Self {
            student_cwid: next(),
            course: next(),
            grade: Grade::new(next()),
            instructor_cwid: next(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MajorRecord {
    pub major: String,
    pub kind: CourseKind,
    pub course: String,
}

impl FromFields for MajorRecord {
    const ARITY: usize = 3;

    fn from_fields(fields: Vec<String>) -> Self {
        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        Self {
            major: next(),
            kind: CourseKind::from_flag(&next()),
            course: next(),
        }
    }
}
