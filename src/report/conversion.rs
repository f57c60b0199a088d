//! Conversion summary report

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use serde::Serialize;

use crate::convert::Put;
use crate::seqfile::to_string_binary;

/// Totals over the inserts built from one sequence file
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ConversionSummary {
    /// File the records were read from
    pub source: PathBuf,
    /// Records read (one insert each)
    pub records: u64,
    /// Records without any cell
    pub empty_records: u64,
    /// Cells carried by all inserts
    pub cells: u64,
    /// Bytes of cell values
    pub value_bytes: u64,
    /// Column families seen, rendered printable
    pub families: BTreeSet<String>,
    /// Time spent reading and building
    #[serde(skip)]
    pub elapsed: Duration,
}

impl ConversionSummary {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn observe(&mut self, put: &Put) {
        self.records += 1;
        if put.is_empty() {
            self.empty_records += 1;
        }
        self.cells += put.len() as u64;
        self.value_bytes += put.value_bytes();
        for family in put.family_map().keys() {
            self.families.insert(to_string_binary(family));
        }
    }

    /// Write the summary as pretty JSON
    pub fn export_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize summary")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write summary: {}", path.display()))?;
        Ok(())
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("Records read"), Cell::new(self.records)]);
        table.add_row(vec![
            Cell::new("Empty records"),
            Cell::new(self.empty_records).fg(if self.empty_records == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);
        table.add_row(vec![Cell::new("Cells"), Cell::new(self.cells)]);
        table.add_row(vec![
            Cell::new("Value bytes"),
            Cell::new(format!("{:.2} MB", self.value_bytes as f64 / (1024.0 * 1024.0))),
        ]);
        table.add_row(vec![
            Cell::new("Families"),
            Cell::new(if self.families.is_empty() {
                "-".to_string()
            } else {
                self.families.iter().cloned().collect::<Vec<_>>().join(", ")
            }),
        ]);
        table.add_row(vec![
            Cell::new("Inserts built"),
            Cell::new(self.records)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table
    }

    pub fn display(&self) {
        println!();
        println!("    {}", style("CONVERSION SUMMARY").white().bold());
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        for line in self.to_table().to_string().lines() {
            println!("    {}", line);
        }

        println!();
        println!(
            "    {} {}",
            style(format!("{:.2}s", self.elapsed.as_secs_f64())).dim(),
            style("inserts built only; nothing was written to a store").dim()
        );
    }
}
