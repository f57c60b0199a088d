//! Legacy record conversion
//!
//! Every record of a sequence file becomes a [`Put`] keyed by the record's
//! row and carrying all of its cells. Inserts are built and then dropped:
//! nothing is submitted to a store.

mod put;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::report::ConversionSummary;
use crate::seqfile::{Record, SeqFileError, SequenceFileReader};
use crate::utils::{create_spinner, finish_with_success};

pub use put::{ConvertError, Put};

/// Source file used when none is given.
pub const DEFAULT_SOURCE_PATH: &str = "/tmp/testSequenceFile";

/// Spinner refresh period, in records.
const PROGRESS_EVERY: u64 = 1_000;

/// Build an insert for each record, stopping at the first failure.
///
/// `on_insert` sees the running totals after each insert is built.
pub fn convert_records<I, F>(
    source: &Path,
    records: I,
    mut on_insert: F,
) -> Result<ConversionSummary, ConvertError>
where
    I: IntoIterator<Item = Result<Record, SeqFileError>>,
    F: FnMut(&ConversionSummary),
{
    let mut summary = ConversionSummary::new(source);
    for record in records {
        let put = Put::from_record(record?)?;
        summary.observe(&put);
        on_insert(&summary);
    }
    Ok(summary)
}

/// Convert the sequence file at `path`, reporting progress on stderr.
pub fn run_convert(path: &Path) -> Result<ConversionSummary> {
    let start = Instant::now();
    let reader = SequenceFileReader::open(path)
        .with_context(|| format!("Failed to open sequence file: {}", path.display()))?;

    let spinner = create_spinner("Building inserts...");
    let converted = convert_records(path, reader, |summary| {
        if summary.records % PROGRESS_EVERY == 0 {
            spinner.set_position(summary.records);
        }
    });
    let mut summary = match converted {
        Ok(summary) => summary,
        Err(err) => {
            spinner.abandon();
            return Err(err).with_context(|| format!("Failed to convert {}", path.display()));
        }
    };
    spinner.set_position(summary.records);
    finish_with_success(&spinner, "Inserts built");

    summary.elapsed = start.elapsed();
    Ok(summary)
}
