//! Report driver
//!
//! Runs one inventory pass: validate the project, walk the resolved zones
//! one at a time, then list buckets if asked to. The first failure ends the
//! run; lines already written stay on the output.

use super::buckets::{list_buckets, BucketRecord};
use super::context::ExecContext;
use super::instances::{list_in_zone, InstanceRecord, ResourceListing};
use super::zones::{resolve, Zone, ZoneDirectory};
use crate::error::InventoryError;
use std::io::{self, Write};

/// Receives report lines as records are produced
pub trait ReportSink {
    fn zone_header(&mut self, zone: &Zone) -> io::Result<()>;

    fn instance(&mut self, record: &InstanceRecord) -> io::Result<()>;

    fn buckets_header(&mut self) -> io::Result<()>;

    fn bucket(&mut self, record: &BucketRecord) -> io::Result<()>;
}

/// Line-oriented text output
///
/// ```text
/// ZONE: <zone>
/// <name>\t<id>
/// BUCKETS:
/// <bucket>
/// ```
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for TextSink<W> {
    fn zone_header(&mut self, zone: &Zone) -> io::Result<()> {
        writeln!(self.out, "ZONE: {}", zone.name)?;
        self.out.flush()
    }

    fn instance(&mut self, record: &InstanceRecord) -> io::Result<()> {
        writeln!(self.out, "{}\t{}", record.name, record.id)
    }

    fn buckets_header(&mut self) -> io::Result<()> {
        writeln!(self.out, "BUCKETS:")?;
        self.out.flush()
    }

    fn bucket(&mut self, record: &BucketRecord) -> io::Result<()> {
        writeln!(self.out, "{}", record.name)
    }
}

/// What to list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub project: String,
    /// Empty means every zone of the project
    pub zone: String,
    pub include_buckets: bool,
}

impl RunOptions {
    pub fn new(project: impl Into<String>, zone: impl Into<String>, include_buckets: bool) -> Self {
        Self {
            project: project.into(),
            zone: zone.into(),
            include_buckets,
        }
    }

    pub fn validate(&self) -> Result<(), InventoryError> {
        if self.project.trim().is_empty() {
            return Err(InventoryError::Usage(
                "project is required (use --project or set GOOGLE_CLOUD_PROJECT)".to_string(),
            ));
        }
        Ok(())
    }
}

/// Counts from a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub zones: usize,
    pub instances: usize,
    /// `None` when buckets were not requested
    pub buckets: Option<usize>,
}

/// Run one inventory pass
pub async fn run<D, L, S>(
    ctx: &ExecContext,
    directory: &D,
    listing: &L,
    options: &RunOptions,
    sink: &mut S,
) -> Result<RunSummary, InventoryError>
where
    D: ZoneDirectory,
    L: ResourceListing,
    S: ReportSink,
{
    options.validate()?;

    let project = options.project.as_str();
    let mut summary = RunSummary::default();
    let mut zones = resolve(directory, project, &options.zone);

    while let Some(zone) = zones.next(ctx).await? {
        summary.instances += list_in_zone(ctx, listing, project, &zone, sink).await?;
        summary.zones += 1;
    }

    if options.include_buckets {
        summary.buckets = Some(list_buckets(ctx, listing, project, sink).await?);
    }

    tracing::info!(
        "Inventory of {} complete: {} zones, {} instances, buckets: {:?}",
        project,
        summary.zones,
        summary.instances,
        summary.buckets
    );
    Ok(summary)
}
