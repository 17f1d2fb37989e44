/*!
 * Translation reinjection.
 *
 * - `table`: the immutable run-scoped translation table
 * - `chunker`: reflow of translations for the non-wrapping renderer
 * - `pattern`: boundary-guarded matcher compiled from the table
 * - `script`: whole-file substitution for text-form files
 * - `binary`: byte-exact substitution for binary assets
 */

use anyhow::Result;
use std::path::Path;

use crate::encoding::TextCodec;
use crate::errors::SubstitutionError;
use crate::file_utils::FileKind;

pub use self::binary::{BinarySubstitutor, BytePair};
pub use self::chunker::{chunk_translation, DEFAULT_CHUNK_WIDTH, LINE_BREAK_MARKER};
pub use self::pattern::{CompiledMatcher, PatternBuilder, Substitution, NOT_FOUND_PLACEHOLDER};
pub use self::script::ScriptSubstitutor;
pub use self::table::TranslationTable;

pub mod binary;
pub mod chunker;
pub mod pattern;
pub mod script;
pub mod table;

/// Both substitutors, built once per run and shared read-only by every job
#[derive(Debug, Clone)]
pub struct SubstitutionEngine {
    script: ScriptSubstitutor,
    binary: BinarySubstitutor,
}

/// What a single file job changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// Accepted matches or splices
    pub replaced: usize,
    /// Lowercased matches with no translation (text files only)
    pub misses: Vec<String>,
}

impl SubstitutionEngine {
    /// Compile the matcher and encode the byte pairs for a loaded table
    pub fn new(table: TranslationTable, target_codec: TextCodec, binary_source_codec: TextCodec) -> Result<Self> {
        let binary = BinarySubstitutor::new(&table, binary_source_codec, target_codec);
        let script = ScriptSubstitutor::new(table, target_codec)?;
        Ok(Self { script, binary })
    }

    pub fn script(&self) -> &ScriptSubstitutor {
        &self.script
    }

    pub fn binary(&self) -> &BinarySubstitutor {
        &self.binary
    }

    /// Dispatch one file to the substitutor for its form
    pub fn process_file(&self, kind: FileKind, input: &Path, output: &Path) -> Result<FileOutcome, SubstitutionError> {
        if kind.is_text() {
            let result = self.script.process_file(input, output)?;
            Ok(FileOutcome {
                replaced: result.replaced,
                misses: result.misses,
            })
        } else {
            let replaced = self.binary.process_file(input, output)?;
            Ok(FileOutcome {
                replaced,
                misses: Vec::new(),
            })
        }
    }
}
