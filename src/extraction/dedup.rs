use std::collections::HashSet;

use crate::records::LocalizationEntry;

/// Keep the first entry for each distinct original, preserving order
pub fn deduplicate(entries: Vec<LocalizationEntry>) -> Vec<LocalizationEntry> {
    let mut seen = HashSet::with_capacity(entries.len());
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.original.clone()))
        .collect()
}
