/*!
 * Tests for record writing, loading and encoding repair
 */

use std::fs;
use anyhow::Result;
use gamloc::encoding::TextCodec;
use gamloc::records::{Category, LocalizationEntry, RecordLoader, RecordWriter};
use gamloc::RecordError;
use crate::common;

fn gb2312() -> TextCodec {
    TextCodec::for_label("gb2312").unwrap()
}

fn translated(original: &str, translation: &str, context: &str) -> LocalizationEntry {
    LocalizationEntry {
        key: "Assets/a.bsl--line: 1--part: 0".to_string(),
        original: original.to_string(),
        translation: translation.to_string(),
        context: context.to_string(),
    }
}

/// Written lists can be loaded back
#[test]
fn test_write_then_load_should_build_table() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let writer = RecordWriter::new(temp_dir.path());
    writer.write_category(Category::Window, &[translated("Halt", "站住", "")])?;
    writer.write_category(Category::Object, &[translated("Guard", "守卫", "")])?;
    writer.write_category(Category::Global, &[translated("Sword", "", "")])?;

    let table = RecordLoader::new(gb2312(), Some(24)).load_dir(temp_dir.path())?;

    assert_eq!(table.len(), 2);
    assert_eq!(table.get("Halt"), Some("站住"));
    assert_eq!(table.get("Guard"), Some("守卫"));
    assert_eq!(table.get("Sword"), None);
    Ok(())
}

/// A UTF-8 record file is repaired once, with a backup
#[test]
fn test_load_utf8_file_should_repair_and_back_up() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    // "剑" in UTF-8 followed by a quote is not valid GB2312
    let json = serde_json::to_string(&vec![translated("Guard", "剑", "")])?;
    let path = common::create_test_file(temp_dir.path(), "objects.json", json.as_bytes())?;
    assert!(gb2312().decode(json.as_bytes()).is_none());

    let table = RecordLoader::new(gb2312(), None).load_dir(temp_dir.path())?;

    assert_eq!(table.get("Guard"), Some("剑"));
    assert_eq!(fs::read(temp_dir.path().join("objects.json.bak"))?, json.as_bytes());
    assert_eq!(fs::read(&path)?, gb2312().encode(&json).unwrap());
    Ok(())
}

/// Repair drops characters the target encoding cannot represent
#[test]
fn test_repair_should_drop_unencodable_characters() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let json = serde_json::to_string(&vec![
        translated("Guard", "剑", ""),
        translated("Sword", "剑😀", ""),
    ])?;
    common::create_test_file(temp_dir.path(), "windows.json", json.as_bytes())?;

    let table = RecordLoader::new(gb2312(), None).load_dir(temp_dir.path())?;

    assert_eq!(table.get("Sword"), Some("剑"));
    Ok(())
}

/// A file that is neither target-encoded nor UTF-8 is fatal
#[test]
fn test_unrepairable_file_should_fail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "globals.json", [b'[', 0x81, 0x20, b']'])?;

    let err = RecordLoader::new(gb2312(), None).load_dir(temp_dir.path()).unwrap_err();

    assert!(matches!(err, RecordError::RepairFailed { .. }));
    assert!(temp_dir.path().join("globals.json.bak").exists());
    Ok(())
}

/// Malformed JSON is reported as a parse error
#[test]
fn test_malformed_json_should_fail_to_parse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "objects.json", "[{\"original\": }]")?;

    let err = RecordLoader::new(gb2312(), None).load_dir(temp_dir.path()).unwrap_err();

    assert!(matches!(err, RecordError::Parse { .. }));
    Ok(())
}

/// A missing directory yields an empty table
#[test]
fn test_missing_directory_should_yield_empty_table() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let table = RecordLoader::new(gb2312(), None).load_dir(temp_dir.path().join("nope"))?;
    assert!(table.is_empty());
    Ok(())
}

/// Global tooltips are never chunked while other globals are
#[test]
fn test_globals_file_should_chunk_all_but_tooltips() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let entries = vec![
        translated("Press space", "按空格键对话", "previous line: \ncurrent line: TIP=Press space\nnext line: "),
        translated("Sharp", "锋利的刀刃", "previous line: \ncurrent line: SWORDDESC=Sharp\nnext line: "),
    ];
    RecordWriter::new(temp_dir.path()).write_category(Category::Global, &entries)?;

    let table = RecordLoader::new(gb2312(), Some(3)).load_dir(temp_dir.path())?;

    assert_eq!(table.get("Press space"), Some("按空格键对话"));
    assert_eq!(table.get("Sharp"), Some("锋利的/r刀刃"));
    Ok(())
}
