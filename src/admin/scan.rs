//! Catalog scan

use std::io::Write;

use super::{AdminError, Outcome};
use crate::cluster::Catalog;
use crate::config::ClusterConfig;

/// Print the key of every catalog row in the info family, in scanner order.
pub fn scan_meta<C, W>(cluster: &C, config: &ClusterConfig, out: &mut W) -> Result<Outcome, AdminError>
where
    C: Catalog + ?Sized,
    W: Write + ?Sized,
{
    writeln!(out, "Scanning {}", config.catalog_table)?;

    let scanner = cluster.scan_family(&config.info_family)?;
    let mut rows = 0;
    for row in scanner {
        let row = row?;
        writeln!(out, "Found row: {}", row.key)?;
        rows += 1;
    }

    Ok(Outcome::Scanned { rows })
}
