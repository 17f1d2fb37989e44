use log::{debug, error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::encoding::TextCodec;
use crate::errors::RecordError;
use crate::substitution::{chunk_translation, TranslationTable};
use super::model::{Category, LocalizationEntry};

// @module: Translated record loading

/// Context marker of a single-line tooltip field, which is never reflowed
const TOOLTIP_CONTEXT_MARKER: &str = "current line: TIP=";

/// Loads translated record lists into a `TranslationTable`
#[derive(Debug, Clone)]
pub struct RecordLoader {
    // @field: Encoding the record files are expected in
    codec: TextCodec,

    // @field: Reflow width, `None` when the target encoding is not reflowed
    chunk_width: Option<usize>,
}

impl RecordLoader {
    pub fn new(codec: TextCodec, chunk_width: Option<usize>) -> Self {
        Self { codec, chunk_width }
    }

    /// Load every `*.json` record list under `dir` into one table.
    ///
    /// A file that does not decode is repaired once; if it still does not
    /// decode, or any file fails to parse, the whole load fails.
    pub fn load_dir<P: AsRef<Path>>(&self, dir: P) -> Result<TranslationTable, RecordError> {
        let dir = dir.as_ref();
        let mut table = TranslationTable::new();

        if !dir.exists() {
            warn!("Translation directory {:?} does not exist, no translations loaded", dir);
            return Ok(table);
        }

        for path in self.record_files(dir)? {
            let entries = self.load_file(&path)?;
            let category = Category::from_record_path(&path);
            let before = table.len();
            self.apply_entries(&mut table, category, &entries);
            debug!("Loaded {} translations from {:?}", table.len() - before, path);
        }

        info!("Loaded {} translations from {:?}", table.len(), dir);
        Ok(table)
    }

    fn record_files(&self, dir: &Path) -> Result<Vec<PathBuf>, RecordError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| RecordError::Io {
                path: e.path().map_or_else(|| dir.to_path_buf(), Path::to_path_buf),
                source: e.into(),
            })?;
            let path = entry.path();
            if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path.to_path_buf());
            }
        }
        Ok(files)
    }

    /// Decode (repairing if needed) and parse one record list
    pub fn load_file(&self, path: &Path) -> Result<Vec<LocalizationEntry>, RecordError> {
        let content = match self.read_decoded(path) {
            Ok(content) => content,
            Err(RecordError::EncodingMismatch { .. }) => {
                warn!("Not matched with the target {} for {:?}, attempting to fix...", self.codec.name(), path);
                self.repair(path)?
            }
            Err(e) => return Err(e),
        };

        serde_json::from_str(&content).map_err(|source| RecordError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a file and decode it with the target codec
    pub fn read_decoded(&self, path: &Path) -> Result<String, RecordError> {
        let bytes = fs::read(path).map_err(|source| RecordError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.codec.decode(&bytes).ok_or_else(|| RecordError::EncodingMismatch {
            path: path.to_path_buf(),
            encoding: self.codec.name().to_string(),
        })
    }

    /// Back the file up, rewrite its UTF-8 content in the target encoding
    /// (dropping characters it cannot represent), then decode it again.
    fn repair(&self, path: &Path) -> Result<String, RecordError> {
        let io_error = |source| RecordError::Io {
            path: path.to_path_buf(),
            source,
        };

        let backup = crate::file_utils::FileManager::backup_file(path).map_err(io_error)?;
        warn!("Fixing might change the original JSON file, so backup created for it: {:?}", backup);

        let bytes = fs::read(path).map_err(io_error)?;
        let Some(utf8) = TextCodec::utf8().decode(&bytes) else {
            error!("Encoding error loading {:?}, please check if the file encoding is correct.", path);
            return Err(RecordError::RepairFailed {
                path: path.to_path_buf(),
                backup,
            });
        };

        fs::write(path, self.codec.encode_ignoring_errors(&utf8)).map_err(io_error)?;

        self.read_decoded(path).map_err(|_| {
            error!("Encoding error loading {:?}, please check if the file encoding is correct.", path);
            RecordError::RepairFailed {
                path: path.to_path_buf(),
                backup,
            }
        })
    }

    /// Add the translated, non-sentinel entries of one list to the table
    pub fn apply_entries(&self, table: &mut TranslationTable, category: Option<Category>, entries: &[LocalizationEntry]) {
        for entry in entries {
            if entry.has_sentinel_original() || !entry.is_translated() {
                continue;
            }
            let translation = match (self.chunk_width, category) {
                (Some(width), Some(Category::Object | Category::Window)) => chunk_translation(&entry.translation, width),
                (Some(width), Some(Category::Global)) if !entry.context.contains(TOOLTIP_CONTEXT_MARKER) => {
                    chunk_translation(&entry.translation, width)
                }
                _ => entry.translation.clone(),
            };
            table.insert(entry.original.clone(), translation);
        }
    }
}
