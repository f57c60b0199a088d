//! Close-regions and delete-meta batches

use std::collections::BTreeSet;
use std::io::Write;

use super::{AdminError, BatchAction, Outcome, PROCEED_PROMPT};
use crate::cli::Confirmation;
use crate::cluster::{AdminService, Catalog, ClusterError, RegionLocation};
use crate::config::ClusterConfig;
use crate::report::BatchReport;
use crate::utils::create_batch_progress;

/// Close every region of `table` after confirmation.
pub fn close_regions<C, F, W>(
    cluster: &mut C,
    config: &ClusterConfig,
    table: &str,
    confirm: &mut F,
    out: &mut W,
) -> Result<Outcome, AdminError>
where
    C: AdminService + Catalog + ?Sized,
    F: Confirmation + ?Sized,
    W: Write + ?Sized,
{
    run_batch(cluster, config, table, BatchAction::CloseRegions, confirm, out)
}

/// Delete the catalog row of every region of `table` after confirmation.
///
/// The regions stay assigned; only their catalog rows go away.
pub fn delete_meta<C, F, W>(
    cluster: &mut C,
    config: &ClusterConfig,
    table: &str,
    confirm: &mut F,
    out: &mut W,
) -> Result<Outcome, AdminError>
where
    C: AdminService + Catalog + ?Sized,
    F: Confirmation + ?Sized,
    W: Write + ?Sized,
{
    run_batch(cluster, config, table, BatchAction::DeleteMeta, confirm, out)
}

fn run_batch<C, F, W>(
    cluster: &mut C,
    config: &ClusterConfig,
    table: &str,
    action: BatchAction,
    confirm: &mut F,
    out: &mut W,
) -> Result<Outcome, AdminError>
where
    C: AdminService + Catalog + ?Sized,
    F: Confirmation + ?Sized,
    W: Write + ?Sized,
{
    let Some(locations) = table_regions(cluster, table, out)? else {
        return Ok(Outcome::TableMissing);
    };
    let regions: Vec<String> = locations
        .iter()
        .map(|location| location.region.name.clone())
        .collect();

    writeln!(out, "{}", action.announcement(&config.catalog_table))?;
    for region in &regions {
        writeln!(out, "    {}", region)?;
    }
    out.flush()?;

    if !confirm.confirm(PROCEED_PROMPT).map_err(AdminError::Prompt)? {
        writeln!(out, "{}", action.declined_message(&config.catalog_table))?;
        return Ok(Outcome::Declined { regions });
    }

    let progress = create_batch_progress(regions.len() as u64, &action.to_string());
    let mut report = BatchReport::new(action, table);
    for (index, (region, location)) in regions.iter().zip(&locations).enumerate() {
        progress.set_message(progress_label(location));
        if let Err(source) = apply(cluster, action, region) {
            progress.abandon();
            report.failed = Some(region.clone());
            report.pending = regions[index + 1..].to_vec();
            return Err(AdminError::Interrupted { report, source });
        }
        report.processed.push(region.clone());
        progress.inc(1);
    }
    progress.finish_and_clear();

    writeln!(out, "{}", action.finished_message(&config.catalog_table))?;
    Ok(Outcome::Completed(report))
}

fn apply<C>(cluster: &mut C, action: BatchAction, region: &str) -> Result<(), ClusterError>
where
    C: AdminService + Catalog + ?Sized,
{
    match action {
        BatchAction::CloseRegions => cluster.close_region(region),
        BatchAction::DeleteMeta => cluster.delete_row(region),
    }
}

/// Progress line for the region being handled.
fn progress_label(location: &RegionLocation) -> String {
    match &location.server {
        Some(server) => format!("{} on {}", location.region, server),
        None => location.region.to_string(),
    }
}

/// Regions of `table`, or `None` when the table does not exist.
fn table_regions<C, W>(
    cluster: &C,
    table: &str,
    out: &mut W,
) -> Result<Option<Vec<RegionLocation>>, AdminError>
where
    C: AdminService + Catalog + ?Sized,
    W: Write + ?Sized,
{
    if !cluster.table_exists(table)? {
        writeln!(out, "table {} doesn't exist; returning", table)?;
        return Ok(None);
    }
    writeln!(out, "table {} exists", table)?;

    // A region listed twice is still handled once.
    let mut seen = BTreeSet::new();
    let locations = cluster
        .region_locations(table)?
        .into_iter()
        .filter(|location| seen.insert(location.region.name.clone()))
        .collect();
    Ok(Some(locations))
}
