use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

// @module: Record data model

/// Originals that name-like commands use as placeholders, never translated
pub const SENTINEL_WORDS: [&str; 2] = ["none", "response"];

/// One translatable fragment together with where it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizationEntry {
    // @field: Origin identifier (path, line, optional sub-part)
    #[serde(default)]
    pub key: String,

    // @field: Source-language fragment
    pub original: String,

    // @field: Filled in by the translator
    #[serde(default)]
    pub translation: String,

    // @field: Previous/current/next source line
    #[serde(default)]
    pub context: String,
}

impl LocalizationEntry {
    /// Create a fresh, untranslated entry
    pub fn new(key: String, original: String, context: String) -> Self {
        Self {
            key,
            original,
            translation: String::new(),
            context,
        }
    }

    /// Whether the translator has provided a translation
    pub fn is_translated(&self) -> bool {
        !self.translation.is_empty()
    }

    /// Whether the original is a placeholder word (case-insensitive)
    pub fn has_sentinel_original(&self) -> bool {
        is_sentinel(&self.original.to_lowercase())
    }
}

/// Exact-case sentinel check
pub fn is_sentinel(text: &str) -> bool {
    SENTINEL_WORDS.contains(&text)
}

/// Bucket an extracted entry is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Engine-wide constants from the globals file
    Global,
    /// Names and descriptions of game objects
    Object,
    /// Dialogue, menus and other window text
    Window,
}

impl Category {
    /// All buckets in persistence order
    pub const ALL: [Category; 3] = [Category::Global, Category::Object, Category::Window];

    // @returns: File name of the persisted record list
    pub fn file_name(&self) -> &'static str {
        match self {
            Category::Global => "globals.json",
            Category::Object => "objects.json",
            Category::Window => "windows.json",
        }
    }

    /// Infer the bucket of a translated record file from its path.
    ///
    /// Object and window lists take precedence over globals when a path
    /// mentions several bucket names.
    pub fn from_record_path(path: &Path) -> Option<Category> {
        let path = path.to_string_lossy();
        if path.contains("objects") {
            Some(Category::Object)
        } else if path.contains("windows") {
            Some(Category::Window)
        } else if path.contains("globals") {
            Some(Category::Global)
        } else {
            None
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Global => "globals",
            Category::Object => "objects",
            Category::Window => "windows",
        };
        write!(f, "{}", name)
    }
}
