use anyhow::{Context, Result};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::file_utils::FileManager;
use crate::records::{Category, LocalizationEntry};
use crate::records::model::is_sentinel;
use super::dedup::deduplicate;
use super::grammar::{ParsedLine, is_block_text_command, is_name_command};

// @const: Left-hand side of the current line inside a context block
static CURRENT_LINE_KEY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"current line:\s*(.*?)=").unwrap()
});

/// Substrings of the current line's key that mark an object entry (case-sensitive)
const OBJECT_MARKERS: [&str; 2] = ["name", "desc"];

/// Extracts localization entries from script lines
#[derive(Debug, Clone)]
pub struct EntryExtractor {
    // @field: File name that switches on the global grammar
    globals_file: String,
}

impl EntryExtractor {
    pub fn new(globals_file: impl Into<String>) -> Self {
        Self {
            globals_file: globals_file.into(),
        }
    }

    /// Whether a file is the designated engine-wide constants file
    pub fn is_global_file(&self, file_path: &str) -> bool {
        file_path.contains(&self.globals_file)
    }

    /// Extract the entries of one line (1-based `line_num`), in sub-part order
    pub fn extract_line(
        &self,
        file_path: &str,
        lines: &[&str],
        line_num: usize,
        is_global: bool,
    ) -> Vec<LocalizationEntry> {
        let Some(line) = line_num.checked_sub(1).and_then(|i| lines.get(i)) else {
            return Vec::new();
        };
        let Some(parsed) = ParsedLine::parse(line, is_global) else {
            return Vec::new();
        };

        match parsed {
            ParsedLine::GlobalDeclaration { .. } => parsed
                .global_original()
                .filter(|original| is_extractable_original(original))
                .map(|original| {
                    vec![LocalizationEntry::new(
                        format!("{}--line: {}", file_path, line_num),
                        original.to_string(),
                        build_context(lines, line_num),
                    )]
                })
                .unwrap_or_default(),
            ParsedLine::StandardAssignment { command, value } => {
                let name_like = is_name_command(command);
                let extractable = is_block_text_command(command) || (name_like && !is_sentinel(value));
                if !extractable {
                    return Vec::new();
                }

                let mut entries = Vec::new();
                for (part, segment) in value.splitn(2, ',').enumerate() {
                    let segment = segment.trim();
                    if !is_extractable_original(segment) || (name_like && is_sentinel(segment)) {
                        continue;
                    }
                    entries.push(LocalizationEntry::new(
                        format!("{}--line: {}--part: {}", file_path, line_num, part),
                        segment.to_string(),
                        build_context(lines, line_num),
                    ));
                }
                entries
            }
        }
    }

    /// Extract every line of a file's content into the matching buckets
    pub fn extract_content(&self, file_path: &str, content: &str, buckets: &mut ExtractedBuckets) {
        let lines: Vec<&str> = content.lines().collect();
        let is_global = self.is_global_file(file_path);

        for line_num in 1..=lines.len() {
            let entries = self.extract_line(file_path, &lines, line_num, is_global);
            let Some(first) = entries.first() else {
                continue;
            };
            let category = if is_global {
                Category::Global
            } else {
                classify(&first.context)
            };
            buckets.extend(category, entries);
        }
    }

    /// Read a script file from disk and extract it
    pub fn extract_file<P: AsRef<Path>>(&self, path: P, buckets: &mut ExtractedBuckets) -> Result<()> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)
            .with_context(|| format!("Failed to extract text from {:?}", path))?;
        let before = buckets.len();
        self.extract_content(&path.to_string_lossy(), &content, buckets);
        debug!("Extracted {} entries from {:?}", buckets.len() - before, path);
        Ok(())
    }
}

/// Originals must be non-empty and not purely numeric
fn is_extractable_original(text: &str) -> bool {
    !text.is_empty() && !text.chars().all(char::is_numeric)
}

/// Three-line context window around a 1-based line number
pub fn build_context(lines: &[&str], line_num: usize) -> String {
    let i = line_num.saturating_sub(1);
    let previous = if i > 0 { lines.get(i - 1).copied().unwrap_or("") } else { "" };
    let current = lines.get(i).copied().unwrap_or("");
    let next = lines.get(i + 1).copied().unwrap_or("");
    format!(
        "previous line: {}\ncurrent line: {}\nnext line: {}",
        previous.trim(),
        current.trim(),
        next.trim()
    )
}

/// Classify a non-global entry from the key of its context's current line
pub fn classify(context: &str) -> Category {
    let is_object = CURRENT_LINE_KEY_REGEX
        .captures(context)
        .and_then(|caps| caps.get(1))
        .is_some_and(|key| OBJECT_MARKERS.iter().any(|marker| key.as_str().contains(marker)));

    if is_object {
        Category::Object
    } else {
        Category::Window
    }
}

/// Per-category entry lists accumulated over an extraction run
#[derive(Debug, Default, Clone)]
pub struct ExtractedBuckets {
    pub globals: Vec<LocalizationEntry>,
    pub objects: Vec<LocalizationEntry>,
    pub windows: Vec<LocalizationEntry>,
}

impl ExtractedBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append entries to a bucket
    pub fn extend(&mut self, category: Category, entries: Vec<LocalizationEntry>) {
        self.get_mut(category).extend(entries);
    }

    pub fn get(&self, category: Category) -> &[LocalizationEntry] {
        match category {
            Category::Global => &self.globals,
            Category::Object => &self.objects,
            Category::Window => &self.windows,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut Vec<LocalizationEntry> {
        match category {
            Category::Global => &mut self.globals,
            Category::Object => &mut self.objects,
            Category::Window => &mut self.windows,
        }
    }

    /// Total number of entries across buckets
    pub fn len(&self) -> usize {
        self.globals.len() + self.objects.len() + self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deduplicate each bucket independently
    pub fn deduplicated(self) -> Self {
        Self {
            globals: deduplicate(self.globals),
            objects: deduplicate(self.objects),
            windows: deduplicate(self.windows),
        }
    }
}
