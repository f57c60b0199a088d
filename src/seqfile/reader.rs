//! Sequential sequence-file reader.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use super::cell::{decode_cells, decode_row_key};
use super::vint::read_text;
use super::{
    Record, SeqFileError, KEY_CLASS, MAGIC, MIN_VERSION, SYNC_ESCAPE, SYNC_SIZE, VALUE_CLASS,
    VERSION,
};

/// Parsed file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub version: u8,
    pub key_class: String,
    pub value_class: String,
    pub compressed: bool,
    pub block_compressed: bool,
    pub codec: Option<String>,
    pub metadata: Vec<(String, String)>,
    pub sync: [u8; SYNC_SIZE],
}

impl Header {
    fn read<R: Read>(input: &mut R) -> Result<Self, SeqFileError> {
        let mut magic = [0u8; 4];
        input
            .read_exact(&mut magic)
            .map_err(|e| SeqFileError::eof_as_truncated(e, "header"))?;
        if &magic[..3] != MAGIC {
            return Err(SeqFileError::InvalidMagic);
        }
        let version = magic[3];
        if !(MIN_VERSION..=VERSION).contains(&version) {
            return Err(SeqFileError::UnsupportedVersion(version));
        }

        let key_class = read_text(input, "key class")?;
        let value_class = read_text(input, "value class")?;
        let compressed = read_bool(input, "compression flag")?;
        let block_compressed = read_bool(input, "block compression flag")?;

        let codec = if compressed && version >= 5 {
            Some(read_text(input, "codec class")?)
        } else {
            None
        };

        let mut metadata = Vec::new();
        if version >= 6 {
            let count = read_i32(input, "metadata count")?;
            if count < 0 {
                return Err(SeqFileError::Truncated("metadata count"));
            }
            for _ in 0..count {
                let key = read_text(input, "metadata key")?;
                let value = read_text(input, "metadata value")?;
                metadata.push((key, value));
            }
        }

        let mut sync = [0u8; SYNC_SIZE];
        input
            .read_exact(&mut sync)
            .map_err(|e| SeqFileError::eof_as_truncated(e, "sync marker"))?;

        Ok(Self {
            version,
            key_class,
            value_class,
            compressed,
            block_compressed,
            codec,
            metadata,
            sync,
        })
    }

    /// Reject files whose records this reader cannot decode.
    fn validate(&self) -> Result<(), SeqFileError> {
        if self.compressed || self.block_compressed {
            return Err(SeqFileError::UnsupportedCompression {
                codec: self.codec.clone(),
            });
        }
        if self.key_class != KEY_CLASS {
            return Err(SeqFileError::UnexpectedClass {
                role: "key",
                found: self.key_class.clone(),
                expected: KEY_CLASS,
            });
        }
        if self.value_class != VALUE_CLASS {
            return Err(SeqFileError::UnexpectedClass {
                role: "value",
                found: self.value_class.clone(),
                expected: VALUE_CLASS,
            });
        }
        Ok(())
    }
}

/// Lazy, forward-only reader over the records of a sequence file.
///
/// Iteration stops after the first error.
#[derive(Debug)]
pub struct SequenceFileReader<R> {
    input: R,
    header: Header,
    records_read: u64,
    finished: bool,
}

impl SequenceFileReader<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, SeqFileError> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read> SequenceFileReader<R> {
    pub fn new(mut input: R) -> Result<Self, SeqFileError> {
        let header = Header::read(&mut input)?;
        header.validate()?;
        Ok(Self {
            input,
            header,
            records_read: 0,
            finished: false,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Read the next record, or `None` at a clean end of file.
    pub fn next_record(&mut self) -> Result<Option<Record>, SeqFileError> {
        let Some(mut record_len) = self.read_record_length()? else {
            return Ok(None);
        };

        if record_len == SYNC_ESCAPE {
            let mut sync = [0u8; SYNC_SIZE];
            self.input
                .read_exact(&mut sync)
                .map_err(|e| SeqFileError::eof_as_truncated(e, "sync marker"))?;
            if sync != self.header.sync {
                return Err(SeqFileError::SyncMismatch {
                    record: self.records_read,
                });
            }
            match self.read_record_length()? {
                Some(len) => record_len = len,
                None => return Ok(None),
            }
        }

        let key_len = read_i32(&mut self.input, "key length")?;
        if record_len < 0 || key_len < 0 || key_len > record_len {
            return Err(self.invalid(format!(
                "record length {} with key length {}",
                record_len, key_len
            )));
        }

        let key = self.read_payload(key_len as u64, "record key")?;
        let value = self.read_payload((record_len - key_len) as u64, "record value")?;

        let row = decode_row_key(&key).map_err(|reason| self.invalid(reason))?;
        let cells = decode_cells(&value).map_err(|reason| self.invalid(reason))?;
        self.records_read += 1;
        Ok(Some(Record { row, cells }))
    }

    /// Next big-endian length, `None` if the file ends before its first byte.
    fn read_record_length(&mut self) -> Result<Option<i32>, SeqFileError> {
        let mut buf = [0u8; 4];
        let mut filled = 0;
        while filled < buf.len() {
            match self.input.read(&mut buf[filled..]) {
                Ok(0) if filled == 0 => return Ok(None),
                Ok(0) => return Err(SeqFileError::Truncated("record length")),
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(Some(i32::from_be_bytes(buf)))
    }

    /// Read exactly `len` bytes. The buffer grows with the bytes actually
    /// present, so a corrupt length cannot force a large allocation.
    fn read_payload(&mut self, len: u64, what: &'static str) -> Result<Vec<u8>, SeqFileError> {
        let mut buf = Vec::new();
        (&mut self.input).take(len).read_to_end(&mut buf)?;
        if (buf.len() as u64) < len {
            return Err(SeqFileError::Truncated(what));
        }
        Ok(buf)
    }

    fn invalid(&self, reason: String) -> SeqFileError {
        SeqFileError::InvalidRecord {
            record: self.records_read,
            reason,
        }
    }
}

impl<R: Read> Iterator for SequenceFileReader<R> {
    type Item = Result<Record, SeqFileError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

fn read_i32<R: Read + ?Sized>(input: &mut R, what: &'static str) -> Result<i32, SeqFileError> {
    let mut buf = [0u8; 4];
    input
        .read_exact(&mut buf)
        .map_err(|e| SeqFileError::eof_as_truncated(e, what))?;
    Ok(i32::from_be_bytes(buf))
}

fn read_bool<R: Read + ?Sized>(input: &mut R, what: &'static str) -> Result<bool, SeqFileError> {
    let mut buf = [0u8; 1];
    input
        .read_exact(&mut buf)
        .map_err(|e| SeqFileError::eof_as_truncated(e, what))?;
    Ok(buf[0] != 0)
}
