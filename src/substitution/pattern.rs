/*!
 * Boundary-guarded matcher built from a translation table.
 *
 * All originals are compiled into one case-insensitive alternation, longest
 * first, so that "Broken Sword" wins over "Sword". The regex engine has no
 * lookaround, so the boundary guards are checked on the characters around
 * each candidate instead. When the following guard rejects a candidate, the
 * shorter originals that also match at that position are tried before the
 * scan moves on, giving the same result a lookaround pattern would.
 */

use anyhow::{Context, Result};
use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::ops::Range;

use super::table::TranslationTable;

/// Keys whose value is a resource identifier; text after `<key>=` is never translated
pub const RESOURCE_KEYS: [&str; 9] = [
    "skin", "icon", "scene", "playsound", "give", "make", "mapsky", "steam", "script",
];

/// Emitted in place of a match whose translation cannot be looked up
pub const NOT_FOUND_PLACEHOLDER: &str = "not found";

/// File extension that marks a resource reference
const RESOURCE_EXTENSION: &str = ".bmp";

/// Escape character used in resource paths
const PATH_ESCAPE: char = '\\';

const REGEX_SIZE_LIMIT: usize = 256 * (1 << 20);

/// Compiled, read-only matcher shared by every substitution task of a run
#[derive(Debug, Clone)]
pub struct CompiledMatcher {
    // @field: Unguarded alternation; `None` for an empty table
    regex: Option<Regex>,

    // @field: Originals, longest first
    alternatives: Vec<String>,

    // @field: Lowercased first character -> indices into `alternatives`
    by_initial: HashMap<String, Vec<usize>>,
}

/// Result of substituting one piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Text with translations applied
    pub text: String,
    /// Number of accepted matches
    pub replaced: usize,
    /// Lowercased matches that had no translation
    pub misses: Vec<String>,
}

/// Builds a `CompiledMatcher` from a translation table
pub struct PatternBuilder;

impl PatternBuilder {
    /// Compile the table's originals, longest first, into one matcher
    pub fn build(table: &TranslationTable) -> Result<CompiledMatcher> {
        let alternatives: Vec<String> = table
            .sorted_by_length()
            .into_iter()
            .map(|(original, _)| original.to_string())
            .collect();

        if alternatives.is_empty() {
            debug!("Translation table is empty, matcher will not match anything");
            return Ok(CompiledMatcher {
                regex: None,
                alternatives,
                by_initial: HashMap::new(),
            });
        }

        let pattern = alternatives
            .iter()
            .map(|original| regex::escape(original))
            .collect::<Vec<_>>()
            .join("|");

        let regex = RegexBuilder::new(&format!("(?:{})", pattern))
            .case_insensitive(true)
            .size_limit(REGEX_SIZE_LIMIT)
            .dfa_size_limit(REGEX_SIZE_LIMIT)
            .build()
            .context("Failed to compile translation pattern")?;

        let mut by_initial: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, original) in alternatives.iter().enumerate() {
            if let Some(first) = original.chars().next() {
                by_initial.entry(lower_char(first)).or_default().push(i);
            }
        }

        debug!("Compiled translation pattern with {} originals", alternatives.len());

        Ok(CompiledMatcher {
            regex: Some(regex),
            alternatives,
            by_initial,
        })
    }
}

impl CompiledMatcher {
    /// Number of originals in the pattern
    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    /// Byte ranges of every accepted, non-overlapping match, left to right
    pub fn find_matches(&self, text: &str) -> Vec<Range<usize>> {
        let Some(regex) = &self.regex else {
            return Vec::new();
        };

        let mut matches = Vec::new();
        let mut pos = 0;
        while pos <= text.len() {
            let Some(candidate) = regex.find_at(text, pos) else {
                break;
            };
            let start = candidate.start();

            if !preceding_guard_holds(text, start) {
                pos = next_char_boundary(text, start);
                continue;
            }

            let end = if following_guard_holds(text, candidate.end()) {
                Some(candidate.end())
            } else {
                self.shorter_alternative_at(text, start, candidate.end())
            };

            match end {
                Some(end) => {
                    matches.push(start..end);
                    pos = end;
                }
                None => pos = next_char_boundary(text, start),
            }
        }
        matches
    }

    /// Replace every accepted match with its translation.
    ///
    /// Lookups go through the lowercased table; a miss writes the visible
    /// placeholder and is reported, but does not stop the pass.
    pub fn replace_all(&self, text: &str, table: &TranslationTable) -> Substitution {
        let matches = self.find_matches(text);
        let mut out = String::with_capacity(text.len());
        let mut misses = Vec::new();
        let mut last = 0;

        for range in &matches {
            out.push_str(&text[last..range.start]);
            let lowered = text[range.clone()].to_lowercase();
            match table.get_lowercase(&lowered) {
                Some(translation) => out.push_str(translation),
                None => {
                    warn!("Translation not found: {}", lowered);
                    out.push_str(NOT_FOUND_PLACEHOLDER);
                    misses.push(lowered);
                }
            }
            last = range.end;
        }
        out.push_str(&text[last..]);

        Substitution {
            text: out,
            replaced: matches.len(),
            misses,
        }
    }

    /// Longest original shorter than the rejected candidate that matches at
    /// `start` and passes the following guard. Returns its end offset.
    fn shorter_alternative_at(&self, text: &str, start: usize, rejected_end: usize) -> Option<usize> {
        let rest = &text[start..];
        let first = rest.chars().next()?;
        let rejected_len = text[start..rejected_end].chars().count();

        self.by_initial
            .get(&lower_char(first))?
            .iter()
            .map(|&i| self.alternatives[i].as_str())
            .filter(|original| original.chars().count() < rejected_len)
            .filter_map(|original| caseless_prefix_len(rest, original))
            .map(|len| start + len)
            .find(|&end| following_guard_holds(text, end))
    }
}

/// Holds when the character before `start` can precede a translatable word
pub fn preceding_guard_holds(text: &str, start: usize) -> bool {
    let before = &text[..start];
    match before.chars().next_back() {
        None => true,
        Some(c) if c.is_ascii_alphabetic() || c == PATH_ESCAPE || c == '_' => false,
        Some('=') => {
            let key_part = &before[..before.len() - 1];
            !RESOURCE_KEYS.iter().any(|key| ends_with_ignore_ascii_case(key_part, key))
        }
        Some(_) => true,
    }
}

/// Holds when the text from `end` on can follow a translatable word
pub fn following_guard_holds(text: &str, end: usize) -> bool {
    let after = &text[end..];
    match after.chars().next() {
        None => true,
        Some(c) if c.is_ascii_alphabetic() || c == '=' || c == PATH_ESCAPE || c.is_numeric() => false,
        Some(_) => !starts_with_ignore_ascii_case(after, RESOURCE_EXTENSION),
    }
}

fn ends_with_ignore_ascii_case(text: &str, suffix: &str) -> bool {
    text.len() >= suffix.len()
        && text.is_char_boundary(text.len() - suffix.len())
        && text[text.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

fn starts_with_ignore_ascii_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.is_char_boundary(prefix.len())
        && text[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Byte length of the prefix of `text` equal to `pattern` ignoring case
fn caseless_prefix_len(text: &str, pattern: &str) -> Option<usize> {
    let mut text_chars = text.char_indices();
    for p in pattern.chars() {
        let (_, t) = text_chars.next()?;
        if t != p && !t.to_lowercase().eq(p.to_lowercase()) {
            return None;
        }
    }
    Some(text_chars.next().map_or(text.len(), |(i, _)| i))
}

fn lower_char(c: char) -> String {
    c.to_lowercase().collect()
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    pos + text[pos..].chars().next().map_or(1, char::len_utf8)
}
