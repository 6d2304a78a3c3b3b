//! Bucket enumeration
//!
//! Same draining pattern as instance enumeration, scoped to the project.

use super::context::ExecContext;
use super::instances::ResourceListing;
use super::pager::Pager;
use super::report::ReportSink;
use crate::error::{InventoryError, Scope};

/// One storage bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketRecord {
    pub name: String,
}

impl BucketRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// List the buckets of `project`, returning how many were reported
pub async fn list_buckets<L, S>(
    ctx: &ExecContext,
    listing: &L,
    project: &str,
    sink: &mut S,
) -> Result<usize, InventoryError>
where
    L: ResourceListing,
    S: ReportSink,
{
    sink.buckets_header()?;

    let mut pager = Pager::new(listing.open_bucket_listing(project));
    let mut count = 0;

    while let Some(bucket) = pager.next(ctx).await.map_err(|source| {
        tracing::error!("Listing buckets of {} failed: {}", project, source);
        InventoryError::ListingFailure {
            scope: Scope::Buckets {
                project: project.to_string(),
            },
            source,
        }
    })? {
        sink.bucket(&bucket)?;
        count += 1;
    }

    tracing::info!("Project {}: {} buckets", project, count);
    Ok(count)
}
