/*!
 * Tests for file utility functions
 */

use std::path::Path;
use anyhow::Result;
use gamloc::file_utils::{FileKind, FileManager};
use crate::common;

/// Test that find_files only returns files with the requested extension
#[test]
fn test_find_files_with_mixed_tree_should_filter_by_extension() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "Assets/a.bsl", "name=A")?;
    common::create_test_file(temp_dir.path(), "Assets/sub/b.BSL", "name=B")?;
    common::create_test_file(temp_dir.path(), "Assets/c.bmp", [0u8, 1, 2])?;

    let files = FileManager::find_files(temp_dir.path().join("Assets"), "bsl")?;

    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| FileManager::has_extension(f, ".bsl")));
    Ok(())
}

/// Test that output paths mirror the input's relative layout
#[test]
fn test_generate_output_path_with_relative_input_should_mirror_layout() {
    let output = FileManager::generate_output_path(Path::new("Assets/maps/town.bsl"), Path::new("Output"), None);
    assert_eq!(output, Path::new("Output/Assets/maps/town.bsl"));
}

/// Test that binary outputs get the replacement extension
#[test]
fn test_generate_output_path_with_extension_should_replace_it() {
    let output = FileManager::generate_output_path(Path::new("./Assets/town.dat"), Path::new("Output"), Some("gam"));
    assert_eq!(output, Path::new("Output/Assets/town.gam"));
}

/// Test that absolute inputs never escape the output root
#[test]
fn test_generate_output_path_with_absolute_input_should_stay_under_root() {
    let output = FileManager::generate_output_path(Path::new("/data/Assets/town.bsl"), Path::new("Output"), None);
    assert!(output.starts_with("Output"));
}

/// Test file kind classification
#[test]
fn test_detect_file_kind_should_classify_by_extension() {
    assert_eq!(FileManager::detect_file_kind("a/b.bsl", "bsl", "txt"), FileKind::Script);
    assert_eq!(FileManager::detect_file_kind("a/b.TXT", "bsl", "txt"), FileKind::Story);
    assert_eq!(FileManager::detect_file_kind("a/b.dat", "bsl", "txt"), FileKind::Binary);
    assert_eq!(FileManager::detect_file_kind("a/noext", "bsl", "txt"), FileKind::Binary);
    assert!(FileKind::Story.is_text());
    assert!(!FileKind::Binary.is_text());
}

/// Test that backups are written next to the original
#[test]
fn test_backup_file_should_append_bak_suffix() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "utf8/objects.json", "[]")?;

    let backup = FileManager::backup_file(&file)?;

    assert_eq!(backup, temp_dir.path().join("utf8/objects.json.bak"));
    assert_eq!(std::fs::read_to_string(backup)?, "[]");
    Ok(())
}

/// Test that write_bytes creates parent directories
#[test]
fn test_write_bytes_with_missing_parent_should_create_it() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("deep/nested/file.gam");

    FileManager::write_bytes(&target, &[1, 2, 3])?;

    assert!(FileManager::file_exists(&target));
    assert!(FileManager::dir_exists(temp_dir.path().join("deep/nested")));
    Ok(())
}
