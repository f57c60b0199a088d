//! Region administration operations
//!
//! Each operation takes the cluster client, the [`ClusterConfig`], a
//! [`Confirmation`] gate and the writer that receives its output. Operation
//! output is plain text so it can be compared byte for byte.

mod regions;
mod scan;

use std::fmt;
use std::io::{self, Write};

use thiserror::Error;

use crate::cli::{Confirmation, Operation};
use crate::cluster::{AdminService, Catalog, ClusterError};
use crate::config::ClusterConfig;
use crate::report::BatchReport;

pub use regions::{close_regions, delete_meta};
pub use scan::scan_meta;

/// Question asked before any destructive batch.
pub const PROCEED_PROMPT: &str = "Are you sure you want to proceed? [y/n(default)]";

/// Destructive batch kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchAction {
    CloseRegions,
    DeleteMeta,
}

impl BatchAction {
    fn announcement(self, catalog_table: &str) -> String {
        match self {
            Self::CloseRegions => "This will close the following regions: ".to_string(),
            Self::DeleteMeta => format!(
                "This will delete the following regions from {}: ",
                catalog_table
            ),
        }
    }

    fn finished_message(self, catalog_table: &str) -> String {
        match self {
            Self::CloseRegions => "finished closing regions".to_string(),
            Self::DeleteMeta => format!("finished deleting regions from {}", catalog_table),
        }
    }

    fn declined_message(self, catalog_table: &str) -> String {
        match self {
            Self::CloseRegions => "returning without closing regions".to_string(),
            Self::DeleteMeta => format!(
                "returning without deleting regions from {}",
                catalog_table
            ),
        }
    }

    /// Status shown for a region the batch handled.
    pub fn done_label(self) -> &'static str {
        match self {
            Self::CloseRegions => "closed",
            Self::DeleteMeta => "deleted",
        }
    }
}

impl fmt::Display for BatchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CloseRegions => "close-regions",
            Self::DeleteMeta => "delete-meta",
        })
    }
}

/// How an operation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The target table does not exist; nothing was touched.
    TableMissing,
    /// The user did not confirm; nothing was touched.
    Declined { regions: Vec<String> },
    /// Every region of the batch was processed.
    Completed(BatchReport),
    /// A catalog scan finished after `rows` rows.
    Scanned { rows: usize },
}

#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Cluster(#[from] ClusterError),

    /// A close or delete failed part way; `report` says how far it got.
    #[error(
        "{} on {} stopped at region {}",
        .report.action,
        .report.table,
        .report.failed.as_deref().unwrap_or("<unknown>")
    )]
    Interrupted {
        report: BatchReport,
        #[source]
        source: ClusterError,
    },

    #[error("failed to read confirmation")]
    Prompt(#[source] io::Error),

    #[error("failed to write output")]
    Output(#[from] io::Error),
}

/// Dispatch a parsed command-line operation.
pub fn run_operation<C, F, W>(
    operation: &Operation,
    cluster: &mut C,
    config: &ClusterConfig,
    confirm: &mut F,
    out: &mut W,
) -> Result<Outcome, AdminError>
where
    C: AdminService + Catalog,
    F: Confirmation + ?Sized,
    W: Write + ?Sized,
{
    match operation {
        Operation::CloseRegions(table) => close_regions(cluster, config, table, confirm, out),
        Operation::DeleteMeta(table) => delete_meta(cluster, config, table, confirm, out),
        Operation::ScanMeta => scan_meta(cluster, config, out),
    }
}
