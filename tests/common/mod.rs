/*!
 * Common test utilities for the gamloc test suite
 */

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use tempfile::TempDir;

use gamloc::Config;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content, creating parent directories
pub fn create_test_file(dir: &Path, relative: &str, content: impl AsRef<[u8]>) -> Result<PathBuf> {
    let file_path = dir.join(relative);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A configuration whose directories all live under `root`
pub fn config_in(root: &Path) -> Config {
    Config {
        translations_dir: root.join("utf8"),
        asset_dir: root.join("Assets"),
        story_dir: root.join("Stories"),
        output_dir: root.join("Output"),
        extracted_dir: root.join("Extracted"),
        ..Config::default()
    }
}

/// A small script using both grammars' building blocks
pub fn sample_script() -> &'static str {
    "scene=town.bmp\nname=Guard\ndesc=A tired town guard\nwindow=Halt! Who goes there?\nchoice=1,Run away\nicon=Guard\nname=none\n"
}

/// A globals file in the engine-wide constant grammar
pub fn sample_globals() -> &'static str {
    "SWORDNAME=Sword\nSWORDDESC=Sword,A sharp blade\nTIP=Press space to talk\nCOLOR=red\n"
}
