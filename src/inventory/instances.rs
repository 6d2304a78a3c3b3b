//! Instance enumeration
//!
//! Drains the instance listing of one zone and reports every record to the
//! sink as soon as it arrives.

use super::buckets::BucketRecord;
use super::context::ExecContext;
use super::pager::{PageFetcher, Pager};
use super::report::ReportSink;
use super::zones::Zone;
use crate::error::{InventoryError, Scope};

/// One compute instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRecord {
    pub name: String,
    pub id: u64,
    /// Name of the zone whose listing produced this record
    pub zone: String,
}

/// Listing service for instances and buckets
pub trait ResourceListing {
    type Instances: PageFetcher<Item = InstanceRecord>;
    type Buckets: PageFetcher<Item = BucketRecord>;

    fn open_instance_listing(&self, project: &str, zone: &str) -> Self::Instances;

    fn open_bucket_listing(&self, project: &str) -> Self::Buckets;
}

/// List the instances of `zone`, returning how many were reported
///
/// The zone header is reported before the first page is requested, so it
/// appears even for empty zones and for zones whose listing then fails.
pub async fn list_in_zone<L, S>(
    ctx: &ExecContext,
    listing: &L,
    project: &str,
    zone: &Zone,
    sink: &mut S,
) -> Result<usize, InventoryError>
where
    L: ResourceListing,
    S: ReportSink,
{
    sink.zone_header(zone)?;

    let mut pager = Pager::new(listing.open_instance_listing(project, &zone.name));
    let mut count = 0;

    loop {
        let next = pager.next(ctx).await.map_err(|source| {
            tracing::error!("Listing instances in {} failed: {}", zone, source);
            InventoryError::ListingFailure {
                scope: Scope::Instances {
                    project: project.to_string(),
                    zone: zone.name.clone(),
                },
                source,
            }
        })?;

        let Some(mut record) = next else {
            break;
        };

        // Attribution follows the request, not whatever the payload says
        record.zone.clone_from(&zone.name);
        sink.instance(&record)?;
        count += 1;
    }

    tracing::info!(
        "Zone {}: {} instances in {} pages",
        zone,
        count,
        pager.pages_fetched()
    );
    Ok(count)
}
