//! Cluster connection settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Snapshot file used when `--cluster` is not given.
pub const DEFAULT_CLUSTER_PATH: &str = "cluster.json";

/// Name of the catalog table holding one row per region.
pub const DEFAULT_CATALOG_TABLE: &str = ".META.";

/// Column family scanned by `scanmeta` and holding region metadata.
pub const DEFAULT_INFO_FAMILY: &str = "info";

/// Settings shared by every admin operation.
///
/// Built once by the entry point and passed by reference; nothing in the
/// library reads process-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Cluster endpoint (a snapshot file for [`crate::cluster::SnapshotCluster`])
    pub cluster: PathBuf,
    pub catalog_table: String,
    pub info_family: String,
}

impl ClusterConfig {
    pub fn new(cluster: impl Into<PathBuf>) -> Self {
        Self {
            cluster: cluster.into(),
            ..Default::default()
        }
    }

    pub fn cluster_path(&self) -> &Path {
        &self.cluster
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            cluster: PathBuf::from(DEFAULT_CLUSTER_PATH),
            catalog_table: DEFAULT_CATALOG_TABLE.to_string(),
            info_family: DEFAULT_INFO_FAMILY.to_string(),
        }
    }
}
