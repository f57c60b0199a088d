//! Command-line argument definitions using clap

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgGroup, CommandFactory, Parser};

use crate::config::{ClusterConfig, DEFAULT_CLUSTER_PATH};
use crate::convert::DEFAULT_SOURCE_PATH;

/// Flags historically spelled with a single dash.
const LEGACY_FLAGS: [&str; 4] = ["closeregions", "deletemeta", "scanmeta", "cluster"];

/// regionadmin - Close regions, delete catalog rows and scan the catalog table
#[derive(Parser, Debug)]
#[command(name = "regionadmin")]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("operation")
        .args(["closeregions", "deletemeta", "scanmeta"])
        .multiple(false)
))]
pub struct AdminCli {
    /// close regions in table
    #[arg(long, value_name = "table")]
    pub closeregions: Option<String>,

    /// delete table entries from .META.
    #[arg(long, value_name = "table")]
    pub deletemeta: Option<String>,

    /// scan .META.
    #[arg(long)]
    pub scanmeta: bool,

    /// Cluster snapshot to operate on
    #[arg(long, value_name = "path", default_value = DEFAULT_CLUSTER_PATH)]
    pub cluster: PathBuf,
}

/// The single operation selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    CloseRegions(String),
    DeleteMeta(String),
    ScanMeta,
}

impl AdminCli {
    /// The selected operation, or `None` when no selector was given.
    pub fn operation(&self) -> Option<Operation> {
        if let Some(table) = &self.closeregions {
            Some(Operation::CloseRegions(table.clone()))
        } else if let Some(table) = &self.deletemeta {
            Some(Operation::DeleteMeta(table.clone()))
        } else if self.scanmeta {
            Some(Operation::ScanMeta)
        } else {
            None
        }
    }

    pub fn cluster_config(&self) -> ClusterConfig {
        ClusterConfig::new(self.cluster.clone())
    }
}

/// Rewrite `-closeregions`-style flags to the `--closeregions` form clap expects.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let legacy = arg
                .to_str()
                .and_then(|s| s.strip_prefix('-'))
                .filter(|name| LEGACY_FLAGS.contains(name));
            match legacy {
                Some(name) => OsString::from(format!("--{}", name)),
                None => arg,
            }
        })
        .collect()
}

/// Parse `regionadmin` arguments, accepting the single-dash flag spellings.
pub fn parse_admin_args<I, T>(args: I) -> Result<AdminCli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    AdminCli::try_parse_from(normalize_legacy_flags(args))
}

/// Help listing printed for missing or unparseable arguments.
pub fn admin_usage() -> String {
    AdminCli::command().render_help().to_string()
}

/// seqconvert - Build insert operations from a legacy sequence file
#[derive(Parser, Debug)]
#[command(name = "seqconvert")]
#[command(author, version, about, long_about = None)]
pub struct ConvertCli {
    /// Sequence file of row key / cell group records
    #[arg(default_value = DEFAULT_SOURCE_PATH)]
    pub input: PathBuf,

    /// Also write the conversion summary as JSON to this path
    #[arg(long, value_name = "path")]
    pub summary_json: Option<PathBuf>,
}
