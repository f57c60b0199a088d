//! regiontools: region administration for column-store clusters
//!
//! Library behind the `regionadmin` and `seqconvert` binaries: the cluster
//! client seams, the catalog operations, and the legacy sequence-file codec.

pub mod admin;
pub mod cli;
pub mod cluster;
pub mod config;
pub mod convert;
pub mod report;
pub mod seqfile;
pub mod utils;
