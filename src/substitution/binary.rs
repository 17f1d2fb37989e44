/*!
 * Byte-exact substitution for binary assets.
 *
 * Originals are spliced out of the raw buffer and replaced with the
 * translation's bytes in the target encoding. The buffer changes length with
 * every splice, so each search runs against the live buffer. Pairs are applied
 * longest original first, each on the result of the previous one.
 */

use log::debug;
use memchr::memmem;
use std::fs;
use std::path::Path;

use crate::encoding::TextCodec;
use crate::errors::SubstitutionError;
use super::script::write_output;
use super::table::TranslationTable;

/// One original/translation pair in byte form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BytePair {
    pub original: Vec<u8>,
    pub translation: Vec<u8>,
}

/// Applies boundary-checked find/replace to raw byte buffers
#[derive(Debug, Clone, Default)]
pub struct BinarySubstitutor {
    // @field: Encoded pairs, longest original first
    pairs: Vec<BytePair>,
}

impl BinarySubstitutor {
    /// Encode the table's pairs once for the whole run.
    ///
    /// Originals use the encoding the assets were authored in, translations
    /// the target encoding. Pairs that cannot be encoded are left out.
    pub fn new(table: &TranslationTable, source_codec: TextCodec, target_codec: TextCodec) -> Self {
        let mut pairs = Vec::with_capacity(table.len());
        for (original, translation) in table.sorted_by_length() {
            let Some(original_bytes) = source_codec.encode(original) else {
                debug!("Skipping binary pair, {:?} is not representable in {}", original, source_codec.name());
                continue;
            };
            let Some(translation_bytes) = target_codec.encode(translation) else {
                debug!("Skipping binary pair, translation of {:?} is not representable in {}", original, target_codec.name());
                continue;
            };
            pairs.push(BytePair {
                original: original_bytes,
                translation: translation_bytes,
            });
        }
        Self { pairs }
    }

    /// Build from explicit byte pairs, keeping their order
    pub fn from_pairs(pairs: Vec<BytePair>) -> Self {
        Self { pairs }
    }

    pub fn pairs(&self) -> &[BytePair] {
        &self.pairs
    }

    /// Apply every pair to `data` in order. Returns the number of splices.
    pub fn substitute_bytes(&self, data: &mut Vec<u8>) -> usize {
        self.pairs
            .iter()
            .map(|pair| replace_pair(data, &pair.original, &pair.translation))
            .sum()
    }

    /// Read `input`, substitute, and write the result to `output`
    pub fn process_file(&self, input: &Path, output: &Path) -> Result<usize, SubstitutionError> {
        let mut data = fs::read(input).map_err(|source| SubstitutionError::Io {
            path: input.to_path_buf(),
            source,
        })?;
        let replaced = self.substitute_bytes(&mut data);
        write_output(output, &data)?;
        debug!("Spliced {} translations into {:?}", replaced, input);
        Ok(replaced)
    }
}

/// Replace every boundary-valid occurrence of `original` in place.
///
/// After a splice the cursor moves past the inserted bytes, after a rejected
/// candidate past the candidate.
fn replace_pair(data: &mut Vec<u8>, original: &[u8], translation: &[u8]) -> usize {
    if original.is_empty() {
        return 0;
    }

    let finder = memmem::Finder::new(original);
    let mut cursor = 0;
    let mut replaced = 0;

    while cursor <= data.len() {
        let Some(offset) = finder.find(&data[cursor..]) else {
            break;
        };
        let index = cursor + offset;
        let end = index + original.len();

        let before_valid = index == 0 || is_boundary_byte(data[index - 1]);
        let after_valid = end == data.len() || is_boundary_byte(data[end]);

        if before_valid && after_valid {
            data.splice(index..end, translation.iter().copied());
            cursor = index + translation.len();
            replaced += 1;
        } else {
            cursor = end;
        }
    }
    replaced
}

/// A byte may border a match unless it is alphanumeric (read as Latin-1) or `=`
fn is_boundary_byte(byte: u8) -> bool {
    byte != b'=' && !char::from(byte).is_alphanumeric()
}
