/*!
 * Extraction of translatable text from script files.
 *
 * - `grammar`: the two line grammars, parsed into one tagged record
 * - `extractor`: turns parsed lines into classified `LocalizationEntry` values
 * - `dedup`: first-occurrence filter applied per bucket
 */

pub use self::dedup::deduplicate;
pub use self::extractor::{EntryExtractor, ExtractedBuckets, build_context, classify};
pub use self::grammar::ParsedLine;

pub mod dedup;
pub mod extractor;
pub mod grammar;
