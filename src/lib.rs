//! gcp-inventory library
//!
//! Lists the Compute Engine instances of a GCP project zone by zone, and
//! optionally its Cloud Storage buckets.
//!
//! - [`inventory`] - Zone resolution, paginated enumeration and the run driver
//! - [`gcp`] - REST implementation of the zone directory and listing services
//! - [`config`] - Optional configuration file
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod gcp;
pub mod inventory;

pub use error::{InventoryError, Scope, ServiceError};
pub use inventory::{run, ExecContext, RunOptions, RunSummary, TextSink};
