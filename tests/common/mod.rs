//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use regiontools::cluster::{
    AdminService, Catalog, CatalogRow, ClusterError, ClusterSnapshot, RegionInfo, RegionLocation,
    RowScanner,
};
use regiontools::seqfile::{Cell, Record, SequenceFileWriter};
use tempfile::TempDir;

/// A call that changes cluster state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Close(String),
    DeleteRow(String),
}

/// In-memory cluster that records every mutating call.
///
/// Regions are plain names (`r1`, `r2`, ...) listed per table; the catalog
/// scan returns `catalog_rows` in order.
#[derive(Debug, Default)]
pub struct RecordingCluster {
    pub tables: BTreeSet<String>,
    pub regions: BTreeMap<String, Vec<String>>,
    pub catalog_rows: Vec<String>,
    pub calls: Vec<Call>,
    /// Region whose close or delete fails
    pub fail_on: Option<String>,
}

impl RecordingCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: &str, regions: &[&str]) -> Self {
        self.tables.insert(table.to_string());
        self.regions.insert(
            table.to_string(),
            regions.iter().map(|r| r.to_string()).collect(),
        );
        self
    }

    pub fn with_catalog_rows(mut self, rows: &[&str]) -> Self {
        self.catalog_rows = rows.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn failing_on(mut self, region: &str) -> Self {
        self.fail_on = Some(region.to_string());
        self
    }

    pub fn mutating_calls(&self) -> usize {
        self.calls.len()
    }

    fn check_failure(&self, region: &str) -> Result<(), ClusterError> {
        if self.fail_on.as_deref() == Some(region) {
            return Err(ClusterError::RegionNotOnline(region.to_string()));
        }
        Ok(())
    }
}

impl AdminService for RecordingCluster {
    fn table_exists(&self, table: &str) -> Result<bool, ClusterError> {
        Ok(self.tables.contains(table))
    }

    fn close_region(&mut self, region_name: &str) -> Result<(), ClusterError> {
        self.check_failure(region_name)?;
        self.calls.push(Call::Close(region_name.to_string()));
        Ok(())
    }
}

impl Catalog for RecordingCluster {
    fn region_locations(&self, table: &str) -> Result<Vec<RegionLocation>, ClusterError> {
        Ok(self
            .regions
            .get(table)
            .into_iter()
            .flatten()
            .map(|name| RegionLocation {
                region: RegionInfo {
                    name: name.clone(),
                    table: table.to_string(),
                },
                server: Some("host-a:60020".to_string()),
            })
            .collect())
    }

    fn delete_row(&mut self, row_key: &str) -> Result<(), ClusterError> {
        self.check_failure(row_key)?;
        self.calls.push(Call::DeleteRow(row_key.to_string()));
        Ok(())
    }

    fn scan_family<'a>(&'a self, family: &'a str) -> Result<RowScanner<'a>, ClusterError> {
        Ok(Box::new(self.catalog_rows.iter().map(move |key| {
            Ok::<_, ClusterError>(
                CatalogRow::new(key.clone()).with_cell(family, "server", "host-a:60020"),
            )
        })))
    }
}

/// Snapshot with two tables: `users` (three regions) and `events` (one).
pub fn sample_snapshot() -> ClusterSnapshot {
    ClusterSnapshot::new()
        .with_table("users")
        .with_table("events")
        .with_region("info", "events,,1700000000003.e1.", "host-b:60020")
        .with_region("info", "users,,1700000000000.u1.", "host-a:60020")
        .with_region("info", "users,g,1700000000001.u2.", "host-b:60020")
        .with_region("info", "users,p,1700000000002.u3.", "host-a:60020")
}

/// Write `snapshot` into a fresh temp directory.
pub fn write_snapshot(snapshot: &ClusterSnapshot) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cluster.json");
    snapshot.save(&path).unwrap();
    (temp_dir, path)
}

/// A record with `cells` cells in family `cf`, one per qualifier `q0..`.
pub fn sample_record(row: &str, cells: usize) -> Record {
    let cells = (0..cells)
        .map(|i| {
            Cell::put(
                row.as_bytes().to_vec(),
                b"cf".to_vec(),
                format!("q{}", i).into_bytes(),
                1_700_000_000_000 + i as i64,
                format!("{}-value-{}", row, i).into_bytes(),
            )
        })
        .collect();
    Record::new(row.as_bytes().to_vec(), cells)
}

/// Write `records` to a sequence file in a fresh temp directory.
pub fn write_sequence_file(records: &[Record]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("testSequenceFile");
    let mut writer = SequenceFileWriter::create(&path).unwrap();
    for record in records {
        writer.append(record).unwrap();
    }
    writer.finish().unwrap();
    (temp_dir, path)
}
