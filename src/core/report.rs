use crate::core::repository::Repository;
use crate::domain::model::{Instructor, Major, RemainingElectives, Student};
use crate::utils::error::Result;
use std::io::Write;
use tabled::{settings::Style, Table, Tabled};

/// Shown in place of the elective list once any elective is completed.
pub const ELECTIVES_SATISFIED: &str = "None";

#[derive(Tabled, Debug, Clone, PartialEq, Eq)]
pub struct MajorRow {
    #[tabled(rename = "Major")]
    pub name: String,
    #[tabled(rename = "Required Courses")]
    pub required: String,
    #[tabled(rename = "Elective Courses")]
    pub electives: String,
}

#[derive(Tabled, Debug, Clone, PartialEq, Eq)]
pub struct StudentRow {
    #[tabled(rename = "CWID")]
    pub cwid: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Major")]
    pub major: String,
    #[tabled(rename = "Completed Courses")]
    pub completed: String,
    #[tabled(rename = "Remaining Required")]
    pub remaining_required: String,
    #[tabled(rename = "Remaining Electives")]
    pub remaining_electives: String,
}

#[derive(Tabled, Debug, Clone, PartialEq, Eq)]
pub struct InstructorRow {
    #[tabled(rename = "CWID")]
    pub cwid: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Dept")]
    pub dept: String,
    #[tabled(rename = "Course")]
    pub course: String,
    #[tabled(rename = "Students")]
    pub students: usize,
}

fn join_courses<'a>(courses: impl IntoIterator<Item = &'a String>) -> String {
    courses
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<&Major> for MajorRow {
    fn from(major: &Major) -> Self {
        Self {
            name: major.name.clone(),
            required: join_courses(major.required_courses()),
            electives: join_courses(major.elective_courses()),
        }
    }
}

impl From<&Student> for StudentRow {
    fn from(student: &Student) -> Self {
        let remaining_electives = match student.remaining_electives() {
            RemainingElectives::Satisfied => ELECTIVES_SATISFIED.to_string(),
            RemainingElectives::Outstanding(courses) => join_courses(courses),
        };

        Self {
            cwid: student.cwid.clone(),
            name: student.name.clone(),
            major: student.major.clone(),
            completed: join_courses(student.completed_courses().keys()),
            remaining_required: join_courses(student.remaining_required()),
            remaining_electives,
        }
    }
}

/// One row per course the instructor has at least one grade for.
pub fn instructor_rows(instructor: &Instructor) -> impl Iterator<Item = InstructorRow> + '_ {
    instructor
        .courses()
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(move |(course, count)| InstructorRow {
            cwid: instructor.cwid.clone(),
            name: instructor.name.clone(),
            dept: instructor.dept.clone(),
            course: course.to_string(),
            students: count,
        })
}

pub fn major_rows(repository: &Repository) -> Vec<MajorRow> {
    repository.majors().map(MajorRow::from).collect()
}

pub fn student_rows(repository: &Repository) -> Vec<StudentRow> {
    repository.students().map(StudentRow::from).collect()
}

pub fn all_instructor_rows(repository: &Repository) -> Vec<InstructorRow> {
    repository.instructors().flat_map(instructor_rows).collect()
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows).with(Style::ascii()).to_string()
}

pub fn major_table(repository: &Repository) -> String {
    render(major_rows(repository))
}

pub fn student_table(repository: &Repository) -> String {
    render(student_rows(repository))
}

pub fn instructor_table(repository: &Repository) -> String {
    render(all_instructor_rows(repository))
}

/// Writes the three summaries in the order Major, Student, Instructor.
pub fn render_all<W: Write>(repository: &Repository, out: &mut W) -> Result<()> {
    writeln!(out, "Major Summary")?;
    writeln!(out, "{}", major_table(repository))?;
    writeln!(out)?;
    writeln!(out, "Student Summary")?;
    writeln!(out, "{}", student_table(repository))?;
    writeln!(out)?;
    writeln!(out, "Instructor Summary")?;
    writeln!(out, "{}", instructor_table(repository))?;
    Ok(())
}
