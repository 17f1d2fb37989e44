/*!
 * End-to-end tests for the import phase
 */

use std::fs;
use anyhow::Result;
use gamloc::encoding::TextCodec;
use gamloc::file_utils::FileKind;
use gamloc::records::RecordWriter;
use gamloc::{AppError, Category, Controller, LocalizationEntry, RecordError};
use crate::common;

fn translated(original: &str, translation: &str) -> LocalizationEntry {
    LocalizationEntry {
        key: String::new(),
        original: original.to_string(),
        translation: translation.to_string(),
        context: String::new(),
    }
}

fn gb2312() -> TextCodec {
    TextCodec::for_label("gb2312").unwrap()
}

/// Scripts, stories and binary assets are all substituted
#[test]
fn test_run_import_with_sample_tree_should_write_outputs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "Assets/town.bsl", "name=Guard\nicon=Guard\nwindow=Halt!\n")?;
    common::create_test_file(root, "Assets/town.dat", b"\x00Guard\x00=Guard\x00")?;
    common::create_test_file(root, "Stories/intro.txt", "The Guard said: Halt!\n")?;

    let writer = RecordWriter::new(root.join("utf8"));
    writer.write_category(Category::Object, &[translated("Guard", "守卫")])?;
    writer.write_category(Category::Window, &[translated("Halt", "站住")])?;

    let controller = Controller::with_config(common::config_in(root))?;
    let summary = tokio_test::block_on(controller.run_import())?;

    assert_eq!(summary.failed, 0);
    assert_eq!(summary.successful, 3);

    let script = gb2312().decode(&fs::read(find_output(root, "town.bsl"))?);
    assert_eq!(script.as_deref(), Some("name=守卫\nicon=Guard\nwindow=站住!\n"));

    let story = gb2312().decode(&fs::read(find_output(root, "intro.txt"))?);
    assert_eq!(story.as_deref(), Some("The 守卫 said: 站住!\n"));

    let binary = fs::read(find_output(root, "town.gam"))?;
    let mut expected = vec![0u8];
    expected.extend(gb2312().encode("守卫").unwrap());
    expected.extend(b"\x00=Guard\x00");
    assert_eq!(binary, expected);
    Ok(())
}

/// Discovery classifies jobs by tree and extension
#[test]
fn test_discover_jobs_should_classify_files() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "Assets/a.bsl", "name=A")?;
    common::create_test_file(root, "Assets/b.dat", [1u8])?;
    common::create_test_file(root, "Stories/c.txt", "c")?;
    common::create_test_file(root, "Stories/d.png", [2u8])?;

    let controller = Controller::with_config(common::config_in(root))?;
    let jobs = controller.discover_jobs()?;

    let kinds: Vec<(String, FileKind)> = jobs
        .iter()
        .map(|j| (j.input.file_name().unwrap().to_string_lossy().into_owned(), j.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("a.bsl".to_string(), FileKind::Script),
            ("b.dat".to_string(), FileKind::Binary),
            ("c.txt".to_string(), FileKind::Story),
        ]
    );
    assert!(jobs[1].output.to_string_lossy().ends_with("b.gam"));
    assert!(jobs.iter().all(|j| j.output.starts_with(root.join("Output"))));
    Ok(())
}

/// An unrepairable record file aborts before any file is written
#[test]
fn test_run_import_with_broken_records_should_abort() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "Assets/town.bsl", "name=Guard\n")?;
    common::create_test_file(root, "utf8/objects.json", [b'[', 0x81, 0x20, b']'])?;

    let controller = Controller::with_config(common::config_in(root))?;
    let result = tokio_test::block_on(controller.run_import());

    assert!(matches!(result, Err(AppError::Record(RecordError::RepairFailed { .. }))));
    assert!(!root.join("Output").exists());
    Ok(())
}

/// One undecodable script fails alone
#[test]
fn test_run_import_with_one_bad_file_should_finish_the_rest() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "Assets/good.bsl", "name=Guard\n")?;
    common::create_test_file(root, "Assets/bad.bsl", [0x81u8, 0x20])?;
    RecordWriter::new(root.join("utf8")).write_category(Category::Object, &[translated("Guard", "守卫")])?;

    let controller = Controller::with_config(common::config_in(root))?;
    let summary = tokio_test::block_on(controller.run_import())?;

    assert_eq!(summary.successful, 1);
    assert_eq!(summary.failed, 1);
    assert!(summary.failures().next().unwrap().contains("bad.bsl"));
    assert!(find_output(root, "good.bsl").exists());
    Ok(())
}

/// Locate an output file by name under the output root
fn find_output(root: &std::path::Path, name: &str) -> std::path::PathBuf {
    walkdir::WalkDir::new(root.join("Output"))
        .into_iter()
        .filter_map(|e| e.ok())
        .find(|e| e.file_name().to_string_lossy() == name)
        .map(|e| e.path().to_path_buf())
        .unwrap_or_else(|| root.join("Output").join(name))
}
