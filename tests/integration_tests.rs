use anyhow::Result;
use small_registrar::core::report::{all_instructor_rows, student_rows, ELECTIVES_SATISFIED};
use small_registrar::{
    CliConfig, RegistrarError, RegistrarPipeline, RemainingElectives, ReportEngine, Repository,
    SourcePaths, TomlConfig,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const STUDENTS: &str = "10103\tBaldwin, C\tSFEN
10115\tWyatt, X\tSFEN
10172\tForbes, I\tSFEN
11399\tCordova, I\tSYEN
11461\tWright, U\tSYEN
";

const INSTRUCTORS: &str = "98765\tEinstein, A\tSFEN
98764\tFeynman, R\tSFEN
98763\tNewton, I\tSFEN
98760\tDarwin, C\tSYEN
";

const GRADES: &str = "10103\tSSW 567\tA\t98765
10103\tSSW 564\tA-\t98764
10103\tSSW 687\tB\t98764
10103\tCS 501\tB\t98764
10115\tSSW 567\tA\t98765
10115\tSSW 564\tB+\t98764
10115\tCS 545\tA\t98764
10172\tSSW 555\tA\t98763
10172\tSSW 567\tA-\t98765
11399\tSSW 540\tB\t98765
11461\tSYS 800\tA\t98760
11461\tSYS 750\tA-\t98760
11461\tSYS 611\tA\t98760
99999\tSSW 540\tA\t98765
10172\tSSW 540\tF\t12345
";

const MAJORS: &str = "SFEN\tR\tSSW 540
SFEN\tR\tSSW 564
SFEN\tR\tSSW 555
SFEN\tR\tSSW 567
SFEN\tE\tCS 501
SFEN\tE\tCS 513
SFEN\tE\tCS 545
SYEN\tR\tSYS 671
SYEN\tR\tSYS 612
SYEN\tR\tSYS 800
SYEN\tE\tSSW 810
SYEN\tE\tSSW 540
SYEN\tE\tSSW 565
";

fn write_sources(dir: &Path) -> Result<()> {
    fs::write(dir.join("students.txt"), STUDENTS)?;
    fs::write(dir.join("instructors.txt"), INSTRUCTORS)?;
    fs::write(dir.join("grades.txt"), GRADES)?;
    fs::write(dir.join("majors.txt"), MAJORS)?;
    Ok(())
}

fn cli_config(dir: &Path) -> CliConfig {
    CliConfig {
        data_dir: dir.to_path_buf(),
        ..CliConfig::default()
    }
}

#[test]
fn test_end_to_end_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_sources(temp_dir.path())?;

    let engine = ReportEngine::new(RegistrarPipeline::new(cli_config(temp_dir.path())));
    let mut out = Vec::new();
    let summary = engine.run(&mut out)?;

    assert_eq!(summary.students, 5);
    assert_eq!(summary.instructors, 4);
    assert_eq!(summary.majors, 2);

    // 一個未知學生，一個未知講師
    let warnings = engine.pipeline().take_warnings();
    assert_eq!(warnings.len(), 2);
    assert!(warnings
        .iter()
        .any(|w| matches!(w, RegistrarError::UnknownStudent { cwid, .. } if cwid == "99999")));
    assert!(warnings
        .iter()
        .any(|w| matches!(w, RegistrarError::UnknownInstructor { cwid, .. } if cwid == "12345")));

    let report = String::from_utf8(out)?;
    let major = report.find("Major Summary").unwrap();
    let student = report.find("Student Summary").unwrap();
    let instructor = report.find("Instructor Summary").unwrap();
    assert!(major < student && student < instructor);

    assert!(report.contains("SSW 540, SSW 564, SSW 555, SSW 567"));
    assert!(report.contains("SSW 810, SSW 540, SSW 565"));
    assert!(report.contains("Baldwin, C"));
    assert!(report.contains("Darwin, C"));
    Ok(())
}

#[test]
fn test_student_progress_across_majors() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_sources(temp_dir.path())?;

    let (mut repo, _) = Repository::load(&SourcePaths::in_dir(temp_dir.path()))?;
    repo.compute_remaining();

    let baldwin = repo.student("10103").unwrap();
    assert_eq!(
        baldwin.completed_course_codes(),
        vec!["CS 501", "SSW 564", "SSW 567", "SSW 687"]
    );
    assert!(baldwin.remaining_electives().is_satisfied());

    // 不及格的 SSW 540 仍列為必修
    let forbes = repo.student("10172").unwrap();
    assert_eq!(forbes.courses().len(), 3);
    assert!(forbes.remaining_required().contains("SSW 540"));
    assert_eq!(
        forbes.remaining_electives(),
        &RemainingElectives::Outstanding(
            ["CS 501", "CS 513", "CS 545"]
                .iter()
                .map(|c| c.to_string())
                .collect()
        )
    );

    // SSW 540 是 SYEN 的選修，完成一門即滿足
    let cordova = repo.student("11399").unwrap();
    assert!(cordova.remaining_electives().is_satisfied());
    assert_eq!(cordova.remaining_required().len(), 3);

    let rows = student_rows(&repo);
    let wright = rows.iter().find(|row| row.cwid == "11461").unwrap();
    assert_eq!(wright.remaining_required, "SYS 612, SYS 671");
    assert_eq!(wright.remaining_electives, "SSW 540, SSW 565, SSW 810");
    let cordova_row = rows.iter().find(|row| row.cwid == "11399").unwrap();
    assert_eq!(cordova_row.remaining_electives, ELECTIVES_SATISFIED);
    Ok(())
}

#[test]
fn test_instructor_rows_per_course() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_sources(temp_dir.path())?;

    let (repo, _) = Repository::load(&SourcePaths::in_dir(temp_dir.path()))?;
    let rows = all_instructor_rows(&repo);

    assert!(rows.iter().all(|row| row.students > 0));

    let einstein_567 = rows
        .iter()
        .find(|row| row.cwid == "98765" && row.course == "SSW 567")
        .unwrap();
    assert_eq!(einstein_567.students, 3);

    // 未知學生的成績仍計入講師
    let einstein_540 = rows
        .iter()
        .find(|row| row.cwid == "98765" && row.course == "SSW 540")
        .unwrap();
    assert_eq!(einstein_540.students, 2);

    let feynman: Vec<_> = rows.iter().filter(|row| row.cwid == "98764").collect();
    assert_eq!(feynman.len(), 4);
    Ok(())
}

#[test]
fn test_recompute_gives_identical_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_sources(temp_dir.path())?;

    let (mut repo, _) = Repository::load(&SourcePaths::in_dir(temp_dir.path()))?;
    repo.compute_remaining();
    let first = student_rows(&repo);
    repo.compute_remaining();
    let second = student_rows(&repo);

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_missing_input_aborts_without_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_sources(temp_dir.path())?;
    fs::remove_file(temp_dir.path().join("majors.txt"))?;

    let engine = ReportEngine::new(RegistrarPipeline::new(cli_config(temp_dir.path())));
    let mut out = Vec::new();
    let err = engine.run(&mut out).unwrap_err();

    assert!(matches!(err, RegistrarError::FileNotFound { .. }));
    assert!(err.is_fatal());
    assert!(out.is_empty());
    Ok(())
}

#[test]
fn test_malformed_row_aborts_with_line_number() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_sources(temp_dir.path())?;
    fs::write(
        temp_dir.path().join("grades.txt"),
        "10103\tSSW 567\tA\t98765\n10103\tSSW 564\tA-\n",
    )?;

    let engine = ReportEngine::new(RegistrarPipeline::new(cli_config(temp_dir.path())));
    let mut out = Vec::new();
    let err = engine.run(&mut out).unwrap_err();

    match err {
        RegistrarError::MalformedRecord {
            line,
            expected,
            found,
            ..
        } => {
            assert_eq!((line, expected, found), (2, 4, 3));
        }
        other => panic!("expected MalformedRecord, got {other:?}"),
    }
    assert!(out.is_empty());
    Ok(())
}

#[test]
fn test_toml_config_drives_pipeline() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let data_dir = temp_dir.path().join("fall");
    fs::create_dir(&data_dir)?;
    fs::write(data_dir.join("people.psv"), "10103|Baldwin, C|SFEN\n")?;
    fs::write(data_dir.join("staff.psv"), "98765|Einstein, A|SFEN\n")?;
    fs::write(data_dir.join("grades.psv"), "10103|SSW 540|A|98765\n")?;
    fs::write(data_dir.join("majors.psv"), "SFEN|R|SSW 540\nSFEN|E|CS 501\n")?;

    let normalized = data_dir.to_string_lossy().replace('\\', "/");
    let config = TomlConfig::from_toml_str(&format!(
        r#"
[sources]
data_dir = "{}"
students = "people.psv"
instructors = "staff.psv"
grades = "grades.psv"
majors = "majors.psv"
separator = "|"
"#,
        normalized
    ))?;

    let engine = ReportEngine::new(RegistrarPipeline::new(config));
    let mut out = Vec::new();
    let summary = engine.run(&mut out)?;

    assert_eq!(summary.students, 1);
    let report = String::from_utf8(out)?;
    assert!(report.contains("Baldwin, C"));
    assert!(report.contains("CS 501"));
    Ok(())
}
