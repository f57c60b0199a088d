//! Error types for sequence-file reading and writing.

use std::io;

use thiserror::Error;

/// Errors raised by the sequence-file codec.
#[derive(Debug, Error)]
pub enum SeqFileError {
    /// I/O error while reading or writing the file.
    #[error("I/O error")]
    Io(#[from] io::Error),

    /// File does not start with `SEQ`.
    #[error("Invalid sequence file: magic number mismatch")]
    InvalidMagic,

    /// Header version outside the supported range.
    #[error("Unsupported sequence file version {0}")]
    UnsupportedVersion(u8),

    /// Record or block compression is not supported.
    #[error("Compressed sequence files are not supported (codec: {})", .codec.as_deref().unwrap_or("default"))]
    UnsupportedCompression { codec: Option<String> },

    /// Key or value class is not the row key / cell group pair.
    #[error("Unexpected {role} class {found}, expected {expected}")]
    UnexpectedClass {
        role: &'static str,
        found: String,
        expected: &'static str,
    },

    /// A sync marker differs from the one in the header.
    #[error("Sync marker mismatch before record {record}")]
    SyncMismatch { record: u64 },

    /// File ended in the middle of a structure.
    #[error("Truncated sequence file while reading {0}")]
    Truncated(&'static str),

    /// A record's key or value payload could not be decoded.
    #[error("Invalid record {record}: {reason}")]
    InvalidRecord { record: u64, reason: String },

    /// Header text is not valid UTF-8.
    #[error("Invalid text in header")]
    InvalidText(#[from] std::string::FromUtf8Error),

    /// A value does not fit the field the format stores it in.
    #[error("{field} of {len} bytes exceeds the format limit of {max}")]
    Oversized {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

impl SeqFileError {
    /// Map an early end of file to [`SeqFileError::Truncated`].
    pub(crate) fn eof_as_truncated(err: io::Error, what: &'static str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            SeqFileError::Truncated(what)
        } else {
            SeqFileError::Io(err)
        }
    }
}
