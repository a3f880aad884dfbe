//! Crate-level error types.

use std::fmt;

/// Errors produced by the seqtrack crate.
#[derive(Debug)]
pub enum TrackError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Protein payload could not be decoded at the document level.
    DataParse(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// No track with the given name exists in the stack.
    UnknownTrack(String),
    /// The axis produced a non-finite or empty residue window.
    InvalidWindow {
        /// Window start as inverted from the left viewport edge.
        lo: f64,
        /// Window end as inverted from the right viewport edge.
        hi: f64,
    },
    /// A primitive could not be turned into output.
    Render(String),
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataParse(msg) => write!(f, "protein data error: {msg}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::UnknownTrack(name) => write!(f, "unknown track: {name}"),
            Self::InvalidWindow { lo, hi } => {
                write!(f, "invalid residue window [{lo}, {hi}]")
            }
            Self::Render(msg) => write!(f, "render error: {msg}"),
        }
    }
}

impl std::error::Error for TrackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TrackError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
