//! Zone resolution
//!
//! Turns a project and an optional explicit zone into the sequence of zones
//! to enumerate. An explicit zone is used as-is, without asking the zone
//! directory whether it exists. Otherwise zones are discovered lazily, page
//! by page, in the order the directory returns them.

use super::context::ExecContext;
use super::pager::{PageFetcher, Pager};
use crate::error::InventoryError;
use std::fmt;

/// A named partition of a project's compute resources
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Zone {
    pub name: String,
}

impl Zone {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Source of the zones available to a project
pub trait ZoneDirectory {
    type Listing: PageFetcher<Item = Zone>;

    /// Open a listing session; no request is made until the first page is pulled
    fn open_zone_listing(&self, project: &str) -> Self::Listing;
}

/// Ordered zones to enumerate
pub enum ZoneSequence<L: PageFetcher<Item = Zone>> {
    Explicit(Option<Zone>),
    Discovered { project: String, pager: Pager<L> },
}

/// Resolve the zones for `project`
///
/// An empty `explicit_zone` means every zone of the project.
pub fn resolve<D: ZoneDirectory>(
    directory: &D,
    project: &str,
    explicit_zone: &str,
) -> ZoneSequence<D::Listing> {
    if !explicit_zone.is_empty() {
        tracing::debug!("Using explicit zone {}", explicit_zone);
        return ZoneSequence::Explicit(Some(Zone::new(explicit_zone)));
    }

    tracing::debug!("Discovering zones of project {}", project);
    ZoneSequence::Discovered {
        project: project.to_string(),
        pager: Pager::new(directory.open_zone_listing(project)),
    }
}

impl<L: PageFetcher<Item = Zone>> ZoneSequence<L> {
    /// Next zone, `Ok(None)` when every zone has been produced
    pub async fn next(&mut self, ctx: &ExecContext) -> Result<Option<Zone>, InventoryError> {
        match self {
            ZoneSequence::Explicit(zone) => Ok(zone.take()),
            ZoneSequence::Discovered { project, pager } => {
                pager
                    .next(ctx)
                    .await
                    .map_err(|source| InventoryError::DirectoryUnavailable {
                        project: project.clone(),
                        source,
                    })
            }
        }
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, ZoneSequence::Explicit(_))
    }
}
