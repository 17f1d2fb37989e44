use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: Mirrored output path for a processed file
    // @params: input_file, output_root, replacement extension
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_root: P2,
        extension: Option<&str>,
    ) -> PathBuf {
        let input_file = input_file.as_ref();

        // Keep the input's relative layout under the output root
        let relative: PathBuf = input_file
            .components()
            .filter(|c| matches!(c, std::path::Component::Normal(_)))
            .collect();

        let output = output_root.as_ref().join(relative);
        match extension {
            Some(ext) => output.with_extension(ext),
            None => output,
        }
    }

    /// Find files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let normalized_ext = extension.trim_start_matches('.');
        Ok(Self::find_all_files(dir)?
            .into_iter()
            .filter(|path| Self::has_extension(path, normalized_ext))
            .collect())
    }

    /// Find every regular file under a directory, in a stable order
    pub fn find_all_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            if entry.file_type().is_file() {
                result.push(entry.path().to_path_buf());
            }
        }

        Ok(result)
    }

    /// Case-insensitive extension check
    pub fn has_extension<P: AsRef<Path>>(path: P, extension: &str) -> bool {
        path.as_ref()
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension.trim_start_matches('.')))
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        Self::write_bytes(path, content.as_bytes())
    }

    /// Write raw bytes to a file, creating parent directories
    pub fn write_bytes<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Copy a file next to itself with a `.bak` suffix appended
    pub fn backup_file<P: AsRef<Path>>(path: P) -> std::io::Result<PathBuf> {
        let path = path.as_ref();
        let mut backup = path.as_os_str().to_owned();
        backup.push(".bak");
        let backup = PathBuf::from(backup);
        fs::copy(path, &backup)?;
        Ok(backup)
    }

    /// Classify a discovered file by its extension
    pub fn detect_file_kind<P: AsRef<Path>>(path: P, script_extension: &str, story_extension: &str) -> FileKind {
        let path = path.as_ref();
        if Self::has_extension(path, script_extension) {
            FileKind::Script
        } else if Self::has_extension(path, story_extension) {
            FileKind::Story
        } else {
            FileKind::Binary
        }
    }
}

/// Enum representing the forms a game file can take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `key=value` script file, processed as text
    Script,
    /// Narrative text file, processed as text
    Story,
    /// Any other asset, processed byte-for-byte
    Binary,
}

impl FileKind {
    /// Whether the file is substituted as decoded text
    pub fn is_text(&self) -> bool {
        matches!(self, FileKind::Script | FileKind::Story)
    }
}
