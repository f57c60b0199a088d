//! regionadmin: region administration for column-store clusters
//!
//! Closes a table's regions, deletes a table's rows from the catalog table,
//! or scans the catalog table. Missing or unparseable arguments print the
//! usage listing and exit successfully.

use std::io;

use anyhow::{Context, Result};
use clap::error::ErrorKind;

use regiontools::admin::{run_operation, AdminError};
use regiontools::cli::{admin_usage, parse_admin_args, TerminalConfirmation};
use regiontools::cluster::SnapshotCluster;

fn main() -> Result<()> {
    let cli = match parse_admin_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print()?;
            return Ok(());
        }
        Err(_) => {
            print!("{}", admin_usage());
            return Ok(());
        }
    };

    let Some(operation) = cli.operation() else {
        print!("{}", admin_usage());
        return Ok(());
    };

    let config = cli.cluster_config();
    let mut cluster = SnapshotCluster::connect(&config)
        .with_context(|| format!("Failed to connect to cluster at {}", config.cluster.display()))?;

    let mut confirm = TerminalConfirmation;
    let mut out = io::stdout();
    match run_operation(&operation, &mut cluster, &config, &mut confirm, &mut out) {
        Ok(_) => Ok(()),
        Err(AdminError::Interrupted { report, source }) => {
            report.display();
            Err(AdminError::Interrupted { report, source }.into())
        }
        Err(err) => Err(err.into()),
    }
}
