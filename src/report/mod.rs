//! Report module - summarizing batch and conversion results

pub mod batch;
pub mod conversion;

pub use batch::*;
pub use conversion::*;
