//! Legacy sequence-file codec.
//!
//! Reads and writes the uncompressed Hadoop sequence-file layout used to dump
//! table rows: each record pairs a row key (`ImmutableBytesWritable`) with the
//! row's cells (`Result`).
//!
//! # Module Structure
//!
//! - `error` - Error types for codec failures
//! - `vint` - Zero-compressed variable-length integers and length-prefixed text
//! - `cell` - Cell layout plus the key and value payload encodings
//! - `reader` - Header parsing and the lazy record iterator
//! - `writer` - Header and record output with periodic sync markers

pub mod cell;
pub mod error;
pub mod reader;
pub mod vint;
pub mod writer;

pub use cell::{Cell, CellType};
pub use error::SeqFileError;
pub use reader::{Header, SequenceFileReader};
pub use writer::SequenceFileWriter;

/// Leading bytes of every sequence file.
pub const MAGIC: &[u8; 3] = b"SEQ";

/// Version written by [`SequenceFileWriter`]; the first with header metadata.
pub const VERSION: u8 = 6;

/// Oldest version whose class names are length-prefixed text.
pub const MIN_VERSION: u8 = 4;

pub const SYNC_SIZE: usize = 16;

/// Record length announcing a sync marker instead of a record.
pub const SYNC_ESCAPE: i32 = -1;

/// Minimum bytes between sync markers written by [`SequenceFileWriter`].
pub const SYNC_INTERVAL: u64 = 100 * (4 + SYNC_SIZE as u64);

pub const KEY_CLASS: &str = "org.apache.hadoop.hbase.io.ImmutableBytesWritable";
pub const VALUE_CLASS: &str = "org.apache.hadoop.hbase.client.Result";

/// One row read from or written to a sequence file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub row: Vec<u8>,
    pub cells: Vec<Cell>,
}

impl Record {
    pub fn new(row: impl Into<Vec<u8>>, cells: Vec<Cell>) -> Self {
        Self {
            row: row.into(),
            cells,
        }
    }
}

/// Render bytes with printable ASCII kept and everything else as `\xNN`.
pub fn to_string_binary(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        if (b' '..=b'~').contains(&b) && b != b'\\' {
            out.push(b as char);
        } else {
            out.push_str(&format!("\\x{:02X}", b));
        }
    }
    out
}
