use log::debug;
use std::fs;
use std::path::Path;

use crate::encoding::TextCodec;
use crate::errors::SubstitutionError;
use super::pattern::{CompiledMatcher, PatternBuilder, Substitution};
use super::table::TranslationTable;

// @module: Whole-file substitution for text-form files

/// Applies the compiled matcher to script and narrative-text files
#[derive(Debug, Clone)]
pub struct ScriptSubstitutor {
    // @field: Translations looked up by lowercased match
    table: TranslationTable,

    // @field: Matcher compiled once from `table`
    matcher: CompiledMatcher,

    // @field: Encoding of the files on disk
    codec: TextCodec,
}

impl ScriptSubstitutor {
    pub fn new(table: TranslationTable, codec: TextCodec) -> anyhow::Result<Self> {
        let matcher = PatternBuilder::build(&table)?;
        Ok(Self { table, matcher, codec })
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    pub fn matcher(&self) -> &CompiledMatcher {
        &self.matcher
    }

    /// One substitution pass over already decoded content
    pub fn substitute_text(&self, content: &str) -> Substitution {
        self.matcher.replace_all(content, &self.table)
    }

    /// Read `input`, substitute, and write the result to `output`
    pub fn process_file(&self, input: &Path, output: &Path) -> Result<Substitution, SubstitutionError> {
        let bytes = fs::read(input).map_err(|source| SubstitutionError::Io {
            path: input.to_path_buf(),
            source,
        })?;

        let content = self.codec.decode(&bytes).ok_or_else(|| SubstitutionError::Decode {
            path: input.to_path_buf(),
            encoding: self.codec.name().to_string(),
        })?;

        let result = self.substitute_text(&content);

        let encoded = self.codec.encode(&result.text).ok_or_else(|| SubstitutionError::Encode {
            path: output.to_path_buf(),
            encoding: self.codec.name().to_string(),
        })?;

        write_output(output, &encoded)?;
        debug!("Substituted {} matches in {:?}", result.replaced, input);
        Ok(result)
    }
}

/// Write bytes, creating parent directories as needed
pub(crate) fn write_output(path: &Path, bytes: &[u8]) -> Result<(), SubstitutionError> {
    let io_error = |source| SubstitutionError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
    }
    fs::write(path, bytes).map_err(io_error)
}
