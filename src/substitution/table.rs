use std::cmp::Reverse;
use std::collections::HashMap;

// @module: Run-scoped translation table

/// Mapping from source fragment to translated fragment.
///
/// Keeps insertion order so that originals of equal length are tried in the
/// order they were loaded. Re-inserting an original updates its translation
/// in place.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    // @field: (original, translation) in first-insertion order
    pairs: Vec<(String, String)>,

    // @field: Exact original -> index into `pairs`
    index: HashMap<String, usize>,

    // @field: Lowercased original -> translation
    lower: HashMap<String, String>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a translation. Empty originals are ignored.
    pub fn insert(&mut self, original: impl Into<String>, translation: impl Into<String>) {
        let original = original.into();
        let translation = translation.into();
        if original.is_empty() {
            return;
        }

        self.lower.insert(original.to_lowercase(), translation.clone());
        match self.index.get(&original) {
            Some(&i) => self.pairs[i].1 = translation,
            None => {
                self.index.insert(original.clone(), self.pairs.len());
                self.pairs.push((original, translation));
            }
        }
    }

    /// Exact-case lookup
    pub fn get(&self, original: &str) -> Option<&str> {
        self.index.get(original).map(|&i| self.pairs[i].1.as_str())
    }

    /// Lookup by an already lowercased key
    pub fn get_lowercase(&self, lowered: &str) -> Option<&str> {
        self.lower.get(lowered).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs ordered by original length in characters, longest first.
    ///
    /// Ties keep insertion order.
    pub fn sorted_by_length(&self) -> Vec<(&str, &str)> {
        let mut sorted: Vec<(&str, &str)> = self
            .pairs
            .iter()
            .map(|(o, t)| (o.as_str(), t.as_str()))
            .collect();
        sorted.sort_by_key(|(original, _)| Reverse(original.chars().count()));
        sorted
    }
}

impl<O: Into<String>, T: Into<String>> FromIterator<(O, T)> for TranslationTable {
    fn from_iter<I: IntoIterator<Item = (O, T)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (original, translation) in iter {
            table.insert(original, translation);
        }
        table
    }
}
