//! Insert operation built from a legacy record

use std::collections::BTreeMap;

use thiserror::Error;

use crate::seqfile::{to_string_binary, Cell, Record, SeqFileError};

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    SeqFile(#[from] SeqFileError),

    /// A cell belongs to a different row than the insert it was added to.
    #[error(
        "cell row {} doesn't match insert row {}",
        to_string_binary(.cell_row),
        to_string_binary(.put_row)
    )]
    RowMismatch { put_row: Vec<u8>, cell_row: Vec<u8> },
}

/// Insert of one row: cells grouped by family, in insertion order within a
/// family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Put {
    row: Vec<u8>,
    families: BTreeMap<Vec<u8>, Vec<Cell>>,
}

impl Put {
    pub fn new(row: impl Into<Vec<u8>>) -> Self {
        Self {
            row: row.into(),
            families: BTreeMap::new(),
        }
    }

    /// Build the insert for `record`, carrying every cell of its group.
    pub fn from_record(record: Record) -> Result<Self, ConvertError> {
        let mut put = Put::new(record.row);
        for cell in record.cells {
            put.add(cell)?;
        }
        Ok(put)
    }

    pub fn add(&mut self, cell: Cell) -> Result<&mut Self, ConvertError> {
        if cell.row != self.row {
            return Err(ConvertError::RowMismatch {
                put_row: self.row.clone(),
                cell_row: cell.row,
            });
        }
        self.families.entry(cell.family.clone()).or_default().push(cell);
        Ok(self)
    }

    pub fn row(&self) -> &[u8] {
        &self.row
    }

    pub fn family_map(&self) -> &BTreeMap<Vec<u8>, Vec<Cell>> {
        &self.families
    }

    /// Number of cells across all families.
    pub fn len(&self) -> usize {
        self.families.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Bytes of cell values carried by the insert.
    pub fn value_bytes(&self) -> u64 {
        self.families
            .values()
            .flatten()
            .map(|cell| cell.value.len() as u64)
            .sum()
    }
}
