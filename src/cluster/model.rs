//! Regions and catalog rows as seen by the admin tool

use std::collections::BTreeMap;
use std::fmt;

use super::ClusterError;

/// `family -> qualifier -> value` cells of one catalog row.
pub type Families = BTreeMap<String, BTreeMap<String, String>>;

/// A region, identified by its catalog row key.
///
/// Region names have the form `<table>,<start key>,<region id>` with an
/// optional `.<encoded name>.` suffix. Table names never contain a comma, but
/// start keys may.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RegionInfo {
    pub name: String,
    pub table: String,
}

impl RegionInfo {
    pub fn parse(name: &str) -> Result<Self, ClusterError> {
        let invalid = || ClusterError::InvalidRegionName(name.to_string());

        let (table, rest) = name.split_once(',').ok_or_else(invalid)?;
        let (_start_key, id_part) = rest.rsplit_once(',').ok_or_else(invalid)?;
        if table.is_empty() {
            return Err(invalid());
        }

        let region_id = id_part.split_once('.').map_or(id_part, |(id, _encoded)| id);
        region_id.parse::<u64>().map_err(|_| invalid())?;

        Ok(Self {
            name: name.to_string(),
            table: table.to_string(),
        })
    }

    /// Row-key prefix shared by every region of `table`.
    pub fn table_prefix(table: &str) -> String {
        format!("{},", table)
    }
}

impl fmt::Display for RegionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A region and the server currently recorded as hosting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionLocation {
    pub region: RegionInfo,
    pub server: Option<String>,
}

/// One row of the catalog table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRow {
    pub key: String,
    pub families: Families,
}

impl CatalogRow {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            families: Families::new(),
        }
    }

    pub fn with_cell(
        mut self,
        family: impl Into<String>,
        qualifier: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.families
            .entry(family.into())
            .or_default()
            .insert(qualifier.into(), value.into());
        self
    }

    pub fn cell(&self, family: &str, qualifier: &str) -> Option<&str> {
        self.families
            .get(family)
            .and_then(|columns| columns.get(qualifier))
            .map(String::as_str)
    }
}
