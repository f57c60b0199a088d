//! Error types for cluster access

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by the cluster client.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// The cluster endpoint could not be reached.
    #[error("cannot reach cluster at {}", .path.display())]
    Unreachable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The endpoint answered with state that could not be decoded.
    #[error("malformed cluster state at {}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A close request named a region that no server is hosting.
    #[error("region {0} is not online")]
    RegionNotOnline(String),

    /// A catalog row key is not a valid region name.
    #[error("invalid region name '{0}'")]
    InvalidRegionName(String),

    /// A mutation was applied but could not be made durable.
    #[error("failed to persist cluster state to {}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
