//! Per-region outcome of a close or delete batch

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::admin::BatchAction;

/// Which regions of a batch were processed, which one failed and which were
/// never attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub action: BatchAction,
    pub table: String,
    pub processed: Vec<String>,
    pub failed: Option<String>,
    pub pending: Vec<String>,
}

impl BatchReport {
    pub fn new(action: BatchAction, table: impl Into<String>) -> Self {
        Self {
            action,
            table: table.into(),
            processed: Vec::new(),
            failed: None,
            pending: Vec::new(),
        }
    }

    /// Whether every region of the batch was processed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_none() && self.pending.is_empty()
    }

    pub fn total(&self) -> usize {
        self.processed.len() + usize::from(self.failed.is_some()) + self.pending.len()
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Region").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

        for region in &self.processed {
            table.add_row(vec![
                Cell::new(region),
                Cell::new(self.action.done_label()).fg(Color::Green),
            ]);
        }
        if let Some(region) = &self.failed {
            table.add_row(vec![
                Cell::new(region),
                Cell::new("failed")
                    .fg(Color::Red)
                    .add_attribute(Attribute::Bold),
            ]);
        }
        for region in &self.pending {
            table.add_row(vec![
                Cell::new(region),
                Cell::new("not processed").fg(Color::Yellow),
            ]);
        }
        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {} {}",
            style("BATCH REPORT").white().bold(),
            style("│").dim(),
            style(format!("{} on {}", self.action, self.table)).cyan()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!(
            "      {} of {} region(s) processed",
            style(self.processed.len()).yellow().bold(),
            self.total()
        );
        println!();

        for line in self.to_table().to_string().lines() {
            println!("    {}", line);
        }
    }
}
