//! GCP API interaction module
//!
//! REST implementation of the zone directory and resource listing services
//! used by the inventory core.
//!
//! # Module Structure
//!
//! - [`auth`] - Application Default Credentials, static tokens, gcloud defaults
//! - [`client`] - Compute Engine / Cloud Storage listing sessions
//! - [`http`] - HTTP utilities for REST API calls
//! - [`types`] - Wire types of the list endpoints
//!
//! # Example
//!
//! ```ignore
//! use gcp_inventory::gcp::client::GcpClient;
//! use gcp_inventory::inventory::{ExecContext, Pager, ZoneDirectory};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let ctx = ExecContext::application_default();
//!     let client = GcpClient::new()?;
//!     let zones = Pager::new(client.open_zone_listing("my-project")).collect(&ctx).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
pub mod types;
