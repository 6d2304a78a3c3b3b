//! GCP Client
//!
//! REST-backed zone directory and resource listing. Each `open_*` call
//! returns an independent listing session that owns its own cursor.

use super::http::GcpHttpClient;
use super::types::{BucketItem, InstanceItem, ListResponse, ZoneItem};
use crate::error::ServiceError;
use crate::inventory::{
    BucketRecord, ExecContext, InstanceRecord, Page, PageFetcher, ResourceListing, Zone,
    ZoneDirectory,
};
use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use url::Url;

pub const DEFAULT_COMPUTE_ENDPOINT: &str = "https://compute.googleapis.com/compute/v1";
pub const DEFAULT_STORAGE_ENDPOINT: &str = "https://storage.googleapis.com/storage/v1";

/// Main GCP client
#[derive(Clone)]
pub struct GcpClient {
    http: GcpHttpClient,
    compute_endpoint: Url,
    storage_endpoint: Url,
    page_size: Option<u32>,
}

impl GcpClient {
    /// Client against the public Google endpoints
    pub fn new() -> Result<Self> {
        Self::with_endpoints(DEFAULT_COMPUTE_ENDPOINT, DEFAULT_STORAGE_ENDPOINT)
    }

    /// Client against custom endpoints (private service connect, test servers)
    pub fn with_endpoints(compute_endpoint: &str, storage_endpoint: &str) -> Result<Self> {
        Ok(Self {
            http: GcpHttpClient::new()?,
            compute_endpoint: parse_endpoint(compute_endpoint)?,
            storage_endpoint: parse_endpoint(storage_endpoint)?,
            page_size: None,
        })
    }

    /// Ask the server for at most `page_size` items per page
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    // =========================================================================
    // Compute Engine API helpers
    // =========================================================================

    /// `<compute>/projects/<project>/zones`
    pub fn zones_url(&self, project: &str) -> Url {
        join_segments(&self.compute_endpoint, &["projects", project, "zones"])
    }

    /// `<compute>/projects/<project>/zones/<zone>/instances`
    pub fn instances_url(&self, project: &str, zone: &str) -> Url {
        join_segments(
            &self.compute_endpoint,
            &["projects", project, "zones", zone, "instances"],
        )
    }

    // =========================================================================
    // Cloud Storage API helpers
    // =========================================================================

    /// `<storage>/b?project=<project>`
    pub fn buckets_url(&self, project: &str) -> Url {
        let mut url = join_segments(&self.storage_endpoint, &["b"]);
        url.query_pairs_mut().append_pair("project", project);
        url
    }

    fn listing<W, T>(&self, url: Url) -> RestListing<W, T> {
        RestListing {
            http: self.http.clone(),
            url,
            page_size: self.page_size,
            _marker: PhantomData,
        }
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint).with_context(|| format!("Invalid endpoint URL: {}", endpoint))?;
    if url.cannot_be_a_base() {
        bail!("Endpoint URL cannot have a path: {}", endpoint);
    }
    Ok(url)
}

/// Append percent-encoded path segments to `base`
fn join_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // Endpoints are checked in parse_endpoint, so this always succeeds
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// One paginated listing session against a list endpoint
pub struct RestListing<W, T> {
    http: GcpHttpClient,
    url: Url,
    page_size: Option<u32>,
    _marker: PhantomData<fn(W) -> T>,
}

impl<W, T> RestListing<W, T> {
    fn page_url(&self, page_token: Option<&str>) -> Url {
        let mut url = self.url.clone();
        if self.page_size.is_some() || page_token.is_some() {
            let mut query = url.query_pairs_mut();
            if let Some(size) = self.page_size {
                query.append_pair("maxResults", &size.to_string());
            }
            if let Some(token) = page_token {
                query.append_pair("pageToken", token);
            }
        }
        url
    }
}

impl<W, T> PageFetcher for RestListing<W, T>
where
    W: DeserializeOwned,
    T: From<W>,
{
    type Item = T;

    async fn fetch_page(
        &mut self,
        ctx: &ExecContext,
        page_token: Option<&str>,
    ) -> Result<Page<T>, ServiceError> {
        let response: ListResponse<W> = self.http.get_json(ctx, self.page_url(page_token)).await?;
        Ok(Page {
            items: response.items.into_iter().map(T::from).collect(),
            next_page_token: response.next_page_token,
        })
    }
}

impl ZoneDirectory for GcpClient {
    type Listing = RestListing<ZoneItem, Zone>;

    fn open_zone_listing(&self, project: &str) -> Self::Listing {
        self.listing(self.zones_url(project))
    }
}

impl ResourceListing for GcpClient {
    type Instances = RestListing<InstanceItem, InstanceRecord>;
    type Buckets = RestListing<BucketItem, BucketRecord>;

    fn open_instance_listing(&self, project: &str, zone: &str) -> Self::Instances {
        self.listing(self.instances_url(project, zone))
    }

    fn open_bucket_listing(&self, project: &str) -> Self::Buckets {
        self.listing(self.buckets_url(project))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GcpClient {
        GcpClient::new().unwrap()
    }

    #[test]
    fn test_zones_url() {
        assert_eq!(
            client().zones_url("demo").as_str(),
            "https://compute.googleapis.com/compute/v1/projects/demo/zones"
        );
    }

    #[test]
    fn test_instances_url_encodes_segments() {
        assert_eq!(
            client().instances_url("demo", "us central/1").as_str(),
            "https://compute.googleapis.com/compute/v1/projects/demo/zones/us%20central%2F1/instances"
        );
    }

    #[test]
    fn test_buckets_url_carries_project() {
        assert_eq!(
            client().buckets_url("demo").as_str(),
            "https://storage.googleapis.com/storage/v1/b?project=demo"
        );
    }

    #[test]
    fn test_trailing_slash_endpoint() {
        let client = GcpClient::with_endpoints("http://localhost:8080/", "http://localhost:8081/storage/v1/")
            .unwrap();
        assert_eq!(
            client.zones_url("p").as_str(),
            "http://localhost:8080/projects/p/zones"
        );
        assert_eq!(
            client.buckets_url("p").as_str(),
            "http://localhost:8081/storage/v1/b?project=p"
        );
    }

    #[test]
    fn test_page_url_adds_token_and_size() {
        let client = client().with_page_size(50);
        let listing = client.open_instance_listing("demo", "z1");
        assert_eq!(listing.page_url(None).query(), Some("maxResults=50"));
        assert_eq!(
            listing.page_url(Some("tok")).query(),
            Some("maxResults=50&pageToken=tok")
        );
    }

    #[test]
    fn test_bucket_page_url_keeps_project() {
        let client = client();
        let listing = client.open_bucket_listing("demo");
        assert_eq!(listing.page_url(None).query(), Some("project=demo"));
        assert_eq!(
            listing.page_url(Some("n")).query(),
            Some("project=demo&pageToken=n")
        );
    }

    #[test]
    fn test_rejects_non_base_endpoint() {
        assert!(GcpClient::with_endpoints("mailto:x@example.com", DEFAULT_STORAGE_ENDPOINT).is_err());
        assert!(GcpClient::with_endpoints("not a url", DEFAULT_STORAGE_ENDPOINT).is_err());
    }
}
