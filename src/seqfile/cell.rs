//! Cell layout and the record key/value payloads.
//!
//! A serialized cell is:
//!
//! ```text
//! i32 key length | i32 value length |
//!   i16 row length | row | u8 family length | family | qualifier | i64 timestamp | u8 type |
//! value
//! ```
//!
//! A record key is an `i32` length followed by the row. A record value is an
//! `i32` total length followed by `i32`-length-prefixed cells; zero means no
//! cells.

use super::SeqFileError;

/// Bytes of a cell key that are not row, family or qualifier.
const KEY_INFRASTRUCTURE: usize = 2 + 1 + 8 + 1;

/// Mutation kind stored with every cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellType {
    Minimum,
    Put,
    Delete,
    DeleteColumn,
    DeleteFamily,
    Maximum,
}

impl CellType {
    pub fn code(self) -> u8 {
        match self {
            CellType::Minimum => 0,
            CellType::Put => 4,
            CellType::Delete => 8,
            CellType::DeleteColumn => 12,
            CellType::DeleteFamily => 14,
            CellType::Maximum => 255,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(CellType::Minimum),
            4 => Some(CellType::Put),
            8 => Some(CellType::Delete),
            12 => Some(CellType::DeleteColumn),
            14 => Some(CellType::DeleteFamily),
            255 => Some(CellType::Maximum),
            _ => None,
        }
    }
}

/// One versioned column value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: Vec<u8>,
    pub family: Vec<u8>,
    pub qualifier: Vec<u8>,
    pub timestamp: i64,
    pub kind: CellType,
    pub value: Vec<u8>,
}

impl Cell {
    pub fn put(
        row: impl Into<Vec<u8>>,
        family: impl Into<Vec<u8>>,
        qualifier: impl Into<Vec<u8>>,
        timestamp: i64,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            row: row.into(),
            family: family.into(),
            qualifier: qualifier.into(),
            timestamp,
            kind: CellType::Put,
            value: value.into(),
        }
    }

    fn key_len(&self) -> usize {
        KEY_INFRASTRUCTURE + self.row.len() + self.family.len() + self.qualifier.len()
    }

    /// Size of the serialized cell, excluding its outer length prefix.
    pub fn encoded_len(&self) -> usize {
        8 + self.key_len() + self.value.len()
    }

    pub fn encode(&self, buf: &mut Vec<u8>) -> Result<(), SeqFileError> {
        let row_len = i16::try_from(self.row.len()).map_err(|_| SeqFileError::Oversized {
            field: "row",
            len: self.row.len(),
            max: i16::MAX as usize,
        })?;
        let family_len = u8::try_from(self.family.len()).map_err(|_| SeqFileError::Oversized {
            field: "family",
            len: self.family.len(),
            max: u8::MAX as usize,
        })?;
        let key_len = checked_i32("cell key", self.key_len())?;
        let value_len = checked_i32("cell value", self.value.len())?;

        buf.reserve(self.encoded_len());
        buf.extend_from_slice(&key_len.to_be_bytes());
        buf.extend_from_slice(&value_len.to_be_bytes());
        buf.extend_from_slice(&row_len.to_be_bytes());
        buf.extend_from_slice(&self.row);
        buf.push(family_len);
        buf.extend_from_slice(&self.family);
        buf.extend_from_slice(&self.qualifier);
        buf.extend_from_slice(&self.timestamp.to_be_bytes());
        buf.push(self.kind.code());
        buf.extend_from_slice(&self.value);
        Ok(())
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, String> {
        let mut cursor = SliceCursor::new(bytes);
        let key_len = cursor.len_i32("cell key length")?;
        let value_len = cursor.len_i32("cell value length")?;
        if cursor.remaining() != key_len + value_len {
            return Err(format!(
                "cell declares {} key and {} value bytes but has {}",
                key_len,
                value_len,
                cursor.remaining()
            ));
        }

        let mut key = SliceCursor::new(cursor.take(key_len, "cell key")?);
        let row_len = key.i16("row length")?;
        if row_len < 0 {
            return Err(format!("negative row length {}", row_len));
        }
        let row = key.take(row_len as usize, "row")?.to_vec();
        let family_len = key.u8("family length")? as usize;
        let family = key.take(family_len, "family")?.to_vec();
        let qualifier_len = key
            .remaining()
            .checked_sub(9)
            .ok_or_else(|| "cell key too short for timestamp and type".to_string())?;
        let qualifier = key.take(qualifier_len, "qualifier")?.to_vec();
        let timestamp = key.i64("timestamp")?;
        let code = key.u8("type")?;
        let kind = CellType::from_code(code).ok_or_else(|| format!("unknown cell type {}", code))?;
        let value = cursor.take(value_len, "cell value")?.to_vec();

        Ok(Self {
            row,
            family,
            qualifier,
            timestamp,
            kind,
            value,
        })
    }
}

/// Encode a record key payload.
pub fn encode_row_key(row: &[u8], buf: &mut Vec<u8>) -> Result<(), SeqFileError> {
    let len = checked_i32("row key", row.len())?;
    buf.extend_from_slice(&len.to_be_bytes());
    buf.extend_from_slice(row);
    Ok(())
}

pub fn decode_row_key(bytes: &[u8]) -> Result<Vec<u8>, String> {
    let mut cursor = SliceCursor::new(bytes);
    let len = cursor.len_i32("row key length")?;
    let row = cursor.take(len, "row key")?.to_vec();
    if cursor.remaining() != 0 {
        return Err(format!("{} trailing bytes after row key", cursor.remaining()));
    }
    Ok(row)
}

/// Encode a record value payload holding `cells`.
pub fn encode_cells(cells: &[Cell], buf: &mut Vec<u8>) -> Result<(), SeqFileError> {
    let total: usize = cells.iter().map(|cell| 4 + cell.encoded_len()).sum();
    buf.extend_from_slice(&checked_i32("cell group", total)?.to_be_bytes());
    for cell in cells {
        buf.extend_from_slice(&checked_i32("cell", cell.encoded_len())?.to_be_bytes());
        cell.encode(buf)?;
    }
    Ok(())
}

pub fn decode_cells(bytes: &[u8]) -> Result<Vec<Cell>, String> {
    let mut cursor = SliceCursor::new(bytes);
    let total = cursor.len_i32("cell group length")?;
    if cursor.remaining() != total {
        return Err(format!(
            "cell group declares {} bytes but has {}",
            total,
            cursor.remaining()
        ));
    }

    let mut cells = Vec::new();
    while cursor.remaining() > 0 {
        let len = cursor.len_i32("cell length")?;
        cells.push(Cell::decode(cursor.take(len, "cell")?)?);
    }
    Ok(cells)
}

fn checked_i32(field: &'static str, len: usize) -> Result<i32, SeqFileError> {
    i32::try_from(len).map_err(|_| SeqFileError::Oversized {
        field,
        len,
        max: i32::MAX as usize,
    })
}

/// Bounds-checked big-endian reads over a byte slice.
struct SliceCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceCursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8], String> {
        if len > self.remaining() {
            return Err(format!(
                "{} needs {} bytes, only {} left",
                what,
                len,
                self.remaining()
            ));
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self, what: &str) -> Result<[u8; N], String> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, what)?);
        Ok(out)
    }

    fn u8(&mut self, what: &str) -> Result<u8, String> {
        Ok(self.array::<1>(what)?[0])
    }

    fn i16(&mut self, what: &str) -> Result<i16, String> {
        Ok(i16::from_be_bytes(self.array(what)?))
    }

    fn i64(&mut self, what: &str) -> Result<i64, String> {
        Ok(i64::from_be_bytes(self.array(what)?))
    }

    /// A non-negative `i32` length.
    fn len_i32(&mut self, what: &str) -> Result<usize, String> {
        let value = i32::from_be_bytes(self.array(what)?);
        usize::try_from(value).map_err(|_| format!("negative {} {}", what, value))
    }
}
