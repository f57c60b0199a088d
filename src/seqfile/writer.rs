//! Uncompressed sequence-file writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::cell::{encode_cells, encode_row_key};
use super::vint::write_text;
use super::{Record, SeqFileError, KEY_CLASS, MAGIC, SYNC_ESCAPE, SYNC_INTERVAL, SYNC_SIZE, VALUE_CLASS, VERSION};

/// Writes version 6 sequence files of row key / cell group records.
///
/// A sync marker is emitted before a record once [`SYNC_INTERVAL`] bytes have
/// been written since the previous marker.
#[derive(Debug)]
pub struct SequenceFileWriter<W: Write> {
    output: W,
    sync: [u8; SYNC_SIZE],
    position: u64,
    last_sync: u64,
}

impl SequenceFileWriter<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self, SeqFileError> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), fresh_sync_marker(), &[])
    }
}

impl<W: Write> SequenceFileWriter<W> {
    pub fn new(
        mut output: W,
        sync: [u8; SYNC_SIZE],
        metadata: &[(String, String)],
    ) -> Result<Self, SeqFileError> {
        let mut header = Vec::new();
        header.extend_from_slice(MAGIC);
        header.push(VERSION);
        write_text(&mut header, KEY_CLASS)?;
        write_text(&mut header, VALUE_CLASS)?;
        // Neither record nor block compression.
        header.extend_from_slice(&[0, 0]);
        let count = i32::try_from(metadata.len()).map_err(|_| SeqFileError::Oversized {
            field: "metadata",
            len: metadata.len(),
            max: i32::MAX as usize,
        })?;
        header.extend_from_slice(&count.to_be_bytes());
        for (key, value) in metadata {
            write_text(&mut header, key)?;
            write_text(&mut header, value)?;
        }
        header.extend_from_slice(&sync);

        output.write_all(&header)?;
        let position = header.len() as u64;
        Ok(Self {
            output,
            sync,
            position,
            last_sync: position,
        })
    }

    pub fn append(&mut self, record: &Record) -> Result<(), SeqFileError> {
        let mut key = Vec::with_capacity(4 + record.row.len());
        encode_row_key(&record.row, &mut key)?;
        let mut value = Vec::new();
        encode_cells(&record.cells, &mut value)?;

        let key_len = i32::try_from(key.len()).map_err(|_| SeqFileError::Oversized {
            field: "record key",
            len: key.len(),
            max: i32::MAX as usize,
        })?;
        let record_len = key.len() + value.len();
        let record_len = i32::try_from(record_len).map_err(|_| SeqFileError::Oversized {
            field: "record",
            len: record_len,
            max: i32::MAX as usize,
        })?;

        if self.position >= self.last_sync + SYNC_INTERVAL {
            self.sync()?;
        }

        self.output.write_all(&record_len.to_be_bytes())?;
        self.output.write_all(&key_len.to_be_bytes())?;
        self.output.write_all(&key)?;
        self.output.write_all(&value)?;
        self.position += 8 + key.len() as u64 + value.len() as u64;
        Ok(())
    }

    /// Write a sync marker unless one was just written.
    pub fn sync(&mut self) -> Result<(), SeqFileError> {
        if self.position != self.last_sync {
            self.output.write_all(&SYNC_ESCAPE.to_be_bytes())?;
            self.output.write_all(&self.sync)?;
            self.position += 4 + SYNC_SIZE as u64;
            self.last_sync = self.position;
        }
        Ok(())
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W, SeqFileError> {
        self.output.flush()?;
        Ok(self.output)
    }
}

/// A sync marker that differs between files.
pub fn fresh_sync_marker() -> [u8; SYNC_SIZE] {
    rand::random()
}
