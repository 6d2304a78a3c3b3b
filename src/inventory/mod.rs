//! Inventory core
//!
//! Service-agnostic enumeration of zones, instances and buckets.
//!
//! # Module Structure
//!
//! - [`context`] - Execution context passed into every service call
//! - [`pager`] - Lazy pagination over a page-at-a-time fetcher
//! - [`zones`] - Zone resolution (explicit zone or directory discovery)
//! - [`instances`] - Per-zone instance enumeration
//! - [`buckets`] - Project-wide bucket enumeration
//! - [`report`] - The run driver and report output
//!
//! # Example
//!
//! ```ignore
//! use gcp_inventory::gcp::client::GcpClient;
//! use gcp_inventory::inventory::{report, ExecContext, RunOptions, TextSink};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let ctx = ExecContext::application_default();
//!     let client = GcpClient::new()?;
//!     let mut sink = TextSink::new(std::io::stdout().lock());
//!     report::run(&ctx, &client, &client, &RunOptions::new("my-project", "", true), &mut sink).await?;
//!     Ok(())
//! }
//! ```

pub mod buckets;
pub mod context;
pub mod instances;
pub mod pager;
pub mod report;
pub mod zones;

pub use buckets::{list_buckets, BucketRecord};
pub use context::ExecContext;
pub use instances::{list_in_zone, InstanceRecord, ResourceListing};
pub use pager::{Page, PageFetcher, Pager};
pub use report::{run, ReportSink, RunOptions, RunSummary, TextSink};
pub use zones::{resolve, Zone, ZoneDirectory, ZoneSequence};
