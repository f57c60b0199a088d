//! JSON snapshot backend for the cluster client traits
//!
//! A snapshot records the tables a cluster knows about, the rows of its
//! catalog table and which regions are currently online. Mutations are
//! applied in memory and written back to the snapshot file before the call
//! returns, so a later invocation sees them.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::model::{CatalogRow, Families, RegionInfo, RegionLocation};
use super::{AdminService, Catalog, ClusterError, RowScanner};
use crate::config::ClusterConfig;

/// Serialized state of a cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterSnapshot {
    /// Tables known to the administrative service
    pub tables: BTreeSet<String>,
    /// Catalog table rows, keyed (and therefore scanned) by row key
    pub catalog: BTreeMap<String, Families>,
    /// Region name -> hosting server, for regions currently open
    pub online: BTreeMap<String, String>,
}

impl ClusterSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.tables.insert(table.into());
        self
    }

    /// Register an online region with a catalog row pointing at `server`.
    pub fn with_region(mut self, info_family: &str, name: &str, server: &str) -> Self {
        let row = CatalogRow::new(name).with_cell(info_family, "server", server);
        self.catalog.insert(row.key, row.families);
        self.online.insert(name.to_string(), server.to_string());
        self
    }

    pub fn with_catalog_row(mut self, row: CatalogRow) -> Self {
        self.catalog.insert(row.key, row.families);
        self
    }

    pub fn load(path: &Path) -> Result<Self, ClusterError> {
        let file = File::open(path).map_err(|source| ClusterError::Unreachable {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            if source.is_io() {
                ClusterError::Unreachable {
                    path: path.to_path_buf(),
                    source: source.into(),
                }
            } else {
                ClusterError::Malformed {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })
    }

    /// Write the snapshot to a temp file next to `path` and rename it into
    /// place, so a failed write leaves the previous snapshot intact.
    pub fn save(&self, path: &Path) -> Result<(), ClusterError> {
        let persist_err = |source: std::io::Error| ClusterError::Persist {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp = NamedTempFile::new_in(dir).map_err(persist_err)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, self).map_err(|e| persist_err(e.into()))?;
            writer.write_all(b"\n").map_err(persist_err)?;
            writer.flush().map_err(persist_err)?;
        }
        temp.as_file().sync_all().map_err(persist_err)?;
        temp.persist(path).map_err(|e| persist_err(e.error))?;
        Ok(())
    }
}

/// Cluster client backed by a snapshot file.
#[derive(Debug)]
pub struct SnapshotCluster {
    path: PathBuf,
    info_family: String,
    state: ClusterSnapshot,
}

impl SnapshotCluster {
    /// Open the snapshot named by `config`.
    pub fn connect(config: &ClusterConfig) -> Result<Self, ClusterError> {
        let state = ClusterSnapshot::load(config.cluster_path())?;
        Ok(Self {
            path: config.cluster.clone(),
            info_family: config.info_family.clone(),
            state,
        })
    }

    pub fn snapshot(&self) -> &ClusterSnapshot {
        &self.state
    }

    fn persist(&self) -> Result<(), ClusterError> {
        self.state.save(&self.path)
    }
}

impl AdminService for SnapshotCluster {
    fn table_exists(&self, table: &str) -> Result<bool, ClusterError> {
        Ok(self.state.tables.contains(table))
    }

    fn close_region(&mut self, region_name: &str) -> Result<(), ClusterError> {
        if self.state.online.remove(region_name).is_none() {
            return Err(ClusterError::RegionNotOnline(region_name.to_string()));
        }
        self.persist()
    }
}

impl Catalog for SnapshotCluster {
    fn region_locations(&self, table: &str) -> Result<Vec<RegionLocation>, ClusterError> {
        let prefix = RegionInfo::table_prefix(table);
        self.state
            .catalog
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .map(|(key, families)| -> Result<RegionLocation, ClusterError> {
                let region = RegionInfo::parse(key)?;
                let server = families
                    .get(&self.info_family)
                    .and_then(|columns| columns.get("server"))
                    .cloned();
                Ok(RegionLocation { region, server })
            })
            .collect()
    }

    fn delete_row(&mut self, row_key: &str) -> Result<(), ClusterError> {
        if self.state.catalog.remove(row_key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    fn scan_family<'a>(&'a self, family: &'a str) -> Result<RowScanner<'a>, ClusterError> {
        let rows = self
            .state
            .catalog
            .iter()
            .filter(move |(_, families)| families.contains_key(family))
            .map(|(key, families)| {
                Ok::<_, ClusterError>(CatalogRow {
                    key: key.clone(),
                    families: families.clone(),
                })
            });
        Ok(Box::new(rows))
    }
}
