//! Common error types used throughout cardforged.
//!
//! Lookup misses and source failures are non-fatal and are normally absorbed
//! by the resolver or the download orchestrator. Malformed records are
//! surfaced per card, and a missing archive aborts the filtering step.

use std::path::PathBuf;

/// Common error type for cardforged.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A lookup or scrape yielded nothing.
    #[error("No match found: {0}")]
    NoMatchFound(String),

    /// A multi-face record is missing a field its variant requires.
    #[error("Malformed record '{card}': missing {field}")]
    MalformedRecord {
        /// Name of the offending card record.
        card: String,
        /// Description of the missing field (e.g. `card_faces[1].name`).
        field: String,
    },

    /// A network or parsing failure from an image source.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// The card archive used for pre-filtering does not exist.
    #[error("Card archive '{}' does not exist", .0.display())]
    ArchiveMissing(PathBuf),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a new NoMatchFound error.
    pub fn no_match<S: Into<String>>(msg: S) -> Self {
        Self::NoMatchFound(msg.into())
    }

    /// Create a new MalformedRecord error.
    pub fn malformed<C: Into<String>, F: Into<String>>(card: C, field: F) -> Self {
        Self::MalformedRecord {
            card: card.into(),
            field: field.into(),
        }
    }

    /// Create a new SourceUnavailable error.
    pub fn unavailable<S: Into<String>>(msg: S) -> Self {
        Self::SourceUnavailable(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether this error should abort a batch rather than be logged per card.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ArchiveMissing(_))
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
