/*!
 * # gamloc - Game script localization toolkit
 *
 * A Rust library for localizing script-driven games.
 *
 * ## Features
 *
 * - Extract translatable text from `key=value` script files into editable
 *   JSON record lists (globals, objects, windows)
 * - Reinject finished translations into script and narrative-text files
 * - Splice translations into binary assets at byte precision
 * - Boundary guards that keep resource keys, file names and identifiers intact
 * - Reflow of long translations for a renderer that does not word-wrap
 * - Parallel processing of independent files
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `extraction`: Line grammars, entry extraction and deduplication
 * - `records`: Record model, JSON writer and encoding-repairing loader
 * - `substitution`: Translation table, chunker, matcher and both substitutors
 * - `orchestrator`: Bounded parallel execution of per-file jobs
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `encoding`: Legacy text encodings
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod encoding;
pub mod errors;
pub mod extraction;
pub mod file_utils;
pub mod orchestrator;
pub mod records;
pub mod substitution;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, ExtractionOutcome};
pub use errors::{AppError, RecordError, SubstitutionError};
pub use extraction::{EntryExtractor, ExtractedBuckets};
pub use orchestrator::{JobResult, Orchestrator, RunSummary, SubstitutionJob};
pub use records::{Category, LocalizationEntry};
pub use substitution::{CompiledMatcher, PatternBuilder, SubstitutionEngine, TranslationTable};
