/*!
 * Tests for the extraction grammar, classification and deduplication
 */

use gamloc::extraction::{deduplicate, EntryExtractor, ExtractedBuckets, ParsedLine};
use gamloc::{Category, LocalizationEntry};
use crate::common;

fn extract(path: &str, content: &str) -> ExtractedBuckets {
    let extractor = EntryExtractor::new("globals.bsl");
    let mut buckets = ExtractedBuckets::new();
    extractor.extract_content(path, content, &mut buckets);
    buckets
}

/// The trailing comma segment of a global declaration is the original
#[test]
fn test_global_declaration_with_comma_should_use_trailing_segment() {
    let lines = ["a", "b", "c", "d", "DESC=Hello,World"];
    let entries = EntryExtractor::new("globals.bsl").extract_line("x", &lines, 5, true);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].key, "x--line: 5");
    assert_eq!(entries[0].original, "World");
    assert_eq!(entries[0].translation, "");
    assert_eq!(entries[0].context, "previous line: d\ncurrent line: DESC=Hello,World\nnext line: ");
}

/// Sentinel segments of name-like commands never become entries
#[test]
fn test_name_command_with_sentinel_segment_should_skip_it() {
    let entries = EntryExtractor::new("globals.bsl").extract_line("a.bsl", &["name=Guard,none"], 1, false);
    let originals: Vec<&str> = entries.iter().map(|e| e.original.as_str()).collect();
    assert_eq!(originals, vec!["Guard"]);
}

/// Block text with two segments yields two keyed entries
#[test]
fn test_block_command_with_two_segments_should_yield_two_entries() {
    let entries = EntryExtractor::new("globals.bsl").extract_line("a.bsl", &["choice=Fight,Run away"], 1, false);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].key, "a.bsl--line: 1--part: 0");
    assert_eq!(entries[1].key, "a.bsl--line: 1--part: 1");
    assert_eq!(entries[1].original, "Run away");
}

/// Only the first comma splits a standard value
#[test]
fn test_block_command_should_split_on_first_comma_only() {
    let entries = EntryExtractor::new("globals.bsl").extract_line("a.bsl", &["window=Well, well, well."], 1, false);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].original, "Well");
    assert_eq!(entries[1].original, "well, well.");
}

/// Every bucket of the sample script is filled as expected
#[test]
fn test_sample_script_should_fill_object_and_window_buckets() {
    let buckets = extract("Assets/town.bsl", common::sample_script());

    let objects: Vec<&str> = buckets.get(Category::Object).iter().map(|e| e.original.as_str()).collect();
    let windows: Vec<&str> = buckets.get(Category::Window).iter().map(|e| e.original.as_str()).collect();

    assert_eq!(objects, vec!["Guard", "A tired town guard"]);
    assert_eq!(windows, vec!["Halt! Who goes there?", "Run away"]);
    assert!(buckets.get(Category::Global).is_empty());
}

/// The globals file uses the global grammar and bucket
#[test]
fn test_sample_globals_should_fill_global_bucket() {
    let buckets = extract("Assets/globals.bsl", common::sample_globals());
    let globals: Vec<&str> = buckets.globals.iter().map(|e| e.original.as_str()).collect();

    assert_eq!(globals, vec!["Sword", "A sharp blade", "Press space to talk"]);
    assert!(buckets.objects.is_empty() && buckets.windows.is_empty());
}

/// Line grammar is a tagged value, not an error, for non-matching lines
#[test]
fn test_parsed_line_without_assignment_should_be_none() {
    assert!(ParsedLine::parse("; a comment", false).is_none());
    assert!(ParsedLine::parse("; a comment", true).is_none());
}

/// Deduplication across files keeps the first occurrence only
#[test]
fn test_deduplicated_buckets_should_have_unique_originals() {
    let extractor = EntryExtractor::new("globals.bsl");
    let mut buckets = ExtractedBuckets::new();
    extractor.extract_content("Assets/a.bsl", "name=Guard\nwindow=Hi\n", &mut buckets);
    extractor.extract_content("Assets/b.bsl", "name=Guard\nwindow=Hi\nwindow=Bye\n", &mut buckets);

    let buckets = buckets.deduplicated();

    assert_eq!(buckets.objects.len(), 1);
    assert_eq!(buckets.objects[0].key, "Assets/a.bsl--line: 1--part: 0");
    let windows: Vec<&str> = buckets.windows.iter().map(|e| e.original.as_str()).collect();
    assert_eq!(windows, vec!["Hi", "Bye"]);
}

/// deduplicate works on any entry sequence
#[test]
fn test_deduplicate_should_preserve_relative_order() {
    let entries: Vec<LocalizationEntry> = ["c", "a", "c", "b", "a"]
        .iter()
        .enumerate()
        .map(|(i, o)| LocalizationEntry::new(i.to_string(), o.to_string(), String::new()))
        .collect();

    let originals: Vec<String> = deduplicate(entries).into_iter().map(|e| e.original).collect();
    assert_eq!(originals, vec!["c", "a", "b"]);
}
