//! Cluster client seams
//!
//! The admin operations never talk to a cluster directly. They go through two
//! traits mirroring the storage system's client library:
//!
//! - [`AdminService`] - table existence checks and region close requests
//! - [`Catalog`] - region enumeration, row deletes and family scans over the
//!   catalog table
//!
//! [`SnapshotCluster`] implements both on top of a JSON cluster snapshot.

mod error;
mod model;
mod snapshot;

pub use error::ClusterError;
pub use model::{CatalogRow, Families, RegionInfo, RegionLocation};
pub use snapshot::{ClusterSnapshot, SnapshotCluster};

/// Lazy, forward-only cursor over catalog rows. Dropping it releases the scan.
pub type RowScanner<'a> = Box<dyn Iterator<Item = Result<CatalogRow, ClusterError>> + 'a>;

/// Administrative service of the cluster.
pub trait AdminService {
    /// Whether `table` is known to the cluster.
    fn table_exists(&self, table: &str) -> Result<bool, ClusterError>;

    /// Ask the hosting server to close `region_name`.
    fn close_region(&mut self, region_name: &str) -> Result<(), ClusterError>;
}

/// The catalog table.
pub trait Catalog {
    /// Regions owned by `table`, in catalog row order.
    fn region_locations(&self, table: &str) -> Result<Vec<RegionLocation>, ClusterError>;

    /// Delete the catalog row keyed by `row_key`. Absent rows are not an error.
    fn delete_row(&mut self, row_key: &str) -> Result<(), ClusterError>;

    /// Scan every row that has cells in `family`.
    fn scan_family<'a>(&'a self, family: &'a str) -> Result<RowScanner<'a>, ClusterError>;
}
