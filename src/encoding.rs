/*!
 * Text encoding helpers.
 *
 * Game files are stored in legacy single/double-byte encodings, so every read
 * and write goes through a `TextCodec` rather than assuming UTF-8.
 */

use anyhow::{anyhow, Result};
use encoding_rs::Encoding;
use std::fmt;

/// A named, strict text codec backed by `encoding_rs`
#[derive(Clone, Copy)]
pub struct TextCodec {
    encoding: &'static Encoding,
    label: &'static str,
}

impl TextCodec {
    /// Resolve a codec from a WHATWG encoding label such as `gb2312` or `windows-1252`
    pub fn for_label(label: &str) -> Result<Self> {
        let normalized = label.trim().to_ascii_lowercase();
        Encoding::for_label(normalized.as_bytes())
            .map(|encoding| Self { encoding, label: encoding.name() })
            .ok_or_else(|| anyhow!("Unknown encoding label: {}", label))
    }

    /// UTF-8 codec
    pub fn utf8() -> Self {
        Self { encoding: encoding_rs::UTF_8, label: encoding_rs::UTF_8.name() }
    }

    /// Canonical name of the underlying encoding
    pub fn name(&self) -> &'static str {
        self.label
    }

    /// Decode bytes, failing on any malformed sequence
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        self.encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned())
    }

    /// Encode text, failing if any character is unmappable
    pub fn encode(&self, text: &str) -> Option<Vec<u8>> {
        let (bytes, _, had_errors) = self.encoding.encode(text);
        if had_errors {
            None
        } else {
            Some(bytes.into_owned())
        }
    }

    /// Encode text, silently dropping unmappable characters
    pub fn encode_ignoring_errors(&self, text: &str) -> Vec<u8> {
        if let Some(bytes) = self.encode(text) {
            return bytes;
        }

        let mut out = Vec::with_capacity(text.len());
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            let (bytes, _, had_errors) = self.encoding.encode(ch.encode_utf8(&mut buf));
            if !had_errors {
                out.extend_from_slice(&bytes);
            }
        }
        out
    }
}

impl fmt::Debug for TextCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextCodec").field(&self.label).finish()
    }
}
