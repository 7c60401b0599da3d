//! Fixture encodings
//!
//! Structured fixtures are a JSON array of arrays of strings. Raw fixtures
//! join each command's tokens with a single space and follow every command,
//! including the last, with [`DATA_SEPARATOR`].

use std::io::Write;
use std::path::Path;

use crate::catalog::Command;
use crate::common::{Error, Result};

/// Marker written after every command in a raw fixture
pub const DATA_SEPARATOR: &str = "--data-separator--";

/// How a scenario is written to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// JSON list of lists of strings, `<name>.json`
    Structured,
    /// Space-joined tokens with separators, `<name>.data`
    Raw,
}

impl Encoding {
    /// File extension for this encoding, without the dot
    pub fn extension(self) -> &'static str {
        match self {
            Encoding::Structured => "json",
            Encoding::Raw => "data",
        }
    }

    /// Encoding implied by a fixture path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Encoding::Structured),
            "data" => Some(Encoding::Raw),
            _ => None,
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Encoding::Structured => write!(f, "structured"),
            Encoding::Raw => write!(f, "raw"),
        }
    }
}

/// Write `commands` in the given encoding
pub fn encode<W: Write>(writer: &mut W, encoding: Encoding, commands: &[Command]) -> Result<()> {
    match encoding {
        Encoding::Structured => encode_structured(writer, commands),
        Encoding::Raw => encode_raw(writer, commands),
    }
}

/// Write `commands` as a single JSON array of arrays
pub fn encode_structured<W: Write>(writer: &mut W, commands: &[Command]) -> Result<()> {
    serde_json::to_writer(writer, commands)?;
    Ok(())
}

/// Write `commands` as a raw token stream
pub fn encode_raw<W: Write>(writer: &mut W, commands: &[Command]) -> Result<()> {
    for command in commands {
        let mut first = true;
        for token in command.tokens() {
            if !first {
                writer.write_all(b" ")?;
            }
            writer.write_all(token.as_bytes())?;
            first = false;
        }
        writer.write_all(DATA_SEPARATOR.as_bytes())?;
    }
    Ok(())
}

/// Parse a structured fixture body
pub fn decode_structured(bytes: &[u8]) -> Result<Vec<Command>> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Parse a raw fixture body
///
/// Lossless only for tokens that contain neither a space nor the
/// separator marker. An empty command decodes to no tokens.
pub fn decode_raw(text: &str) -> Vec<Command> {
    let mut segments: Vec<&str> = text.split(DATA_SEPARATOR).collect();
    // Every command is followed by a separator, leaving one trailing segment.
    if segments.last() == Some(&"") {
        segments.pop();
    }

    segments
        .into_iter()
        .map(|segment| {
            if segment.is_empty() {
                Command::new(Vec::<String>::new())
            } else {
                Command::new(segment.split(' '))
            }
        })
        .collect()
}

/// Read and decode a fixture file, choosing the decoder by extension
pub fn decode_file(path: &Path) -> Result<Vec<Command>> {
    let encoding = Encoding::from_path(path)
        .ok_or_else(|| Error::fixture_decode(path, "unrecognised fixture extension"))?;

    let bytes = std::fs::read(path).map_err(|source| Error::FixtureRead {
        path: path.to_path_buf(),
        source,
    })?;

    match encoding {
        Encoding::Structured => {
            decode_structured(&bytes).map_err(|e| Error::fixture_decode(path, e.to_string()))
        }
        Encoding::Raw => {
            let text = std::str::from_utf8(&bytes)
                .map_err(|e| Error::fixture_decode(path, e.to_string()))?;
            Ok(decode_raw(text))
        }
    }
}
