//! In-memory zone directory and listing services for driving runs in tests

#![allow(dead_code)]

use gcp_inventory::inventory::{
    BucketRecord, ExecContext, InstanceRecord, Page, PageFetcher, ResourceListing, Zone,
    ZoneDirectory,
};
use gcp_inventory::ServiceError;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

/// A scripted page: items, or the HTTP status the page fails with
pub type Scripted<T> = Result<Vec<T>, u16>;

/// Log of every page request, e.g. `zones`, `instances:z1`, `buckets`
pub type CallLog = Rc<RefCell<Vec<String>>>;

pub struct ScriptedPages<T> {
    label: String,
    pages: VecDeque<Scripted<T>>,
    served: usize,
    calls: CallLog,
}

impl<T> PageFetcher for ScriptedPages<T> {
    type Item = T;

    async fn fetch_page(
        &mut self,
        _ctx: &ExecContext,
        page_token: Option<&str>,
    ) -> Result<Page<T>, ServiceError> {
        let expected = (self.served > 0).then(|| format!("page-{}", self.served));
        assert_eq!(
            page_token.map(str::to_string),
            expected,
            "{} asked for the wrong page",
            self.label
        );

        self.calls.borrow_mut().push(self.label.clone());
        self.served += 1;

        match self.pages.pop_front() {
            None => Ok(Page::last(Vec::new())),
            Some(Err(status)) => Err(ServiceError::Api {
                status,
                message: format!("{} failed", self.label),
            }),
            Some(Ok(items)) if self.pages.is_empty() => Ok(Page::last(items)),
            Some(Ok(items)) => Ok(Page::more(items, format!("page-{}", self.served))),
        }
    }
}

#[derive(Default)]
pub struct FakeCloud {
    zone_pages: Vec<Scripted<&'static str>>,
    instance_pages: HashMap<String, Vec<Scripted<(&'static str, u64)>>>,
    bucket_pages: Vec<Scripted<&'static str>>,
    pub calls: CallLog,
}

impl FakeCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zones(mut self, pages: Vec<Scripted<&'static str>>) -> Self {
        self.zone_pages = pages;
        self
    }

    pub fn instances(mut self, zone: &str, pages: Vec<Scripted<(&'static str, u64)>>) -> Self {
        self.instance_pages.insert(zone.to_string(), pages);
        self
    }

    pub fn buckets(mut self, pages: Vec<Scripted<&'static str>>) -> Self {
        self.bucket_pages = pages;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn session<S, T>(&self, label: String, pages: &[Scripted<S>], f: fn(S) -> T) -> ScriptedPages<T>
    where
        S: Clone,
    {
        ScriptedPages {
            label,
            pages: pages
                .iter()
                .map(|page| page.clone().map(|items| items.into_iter().map(f).collect()))
                .collect(),
            served: 0,
            calls: Rc::clone(&self.calls),
        }
    }
}

impl ZoneDirectory for FakeCloud {
    type Listing = ScriptedPages<Zone>;

    fn open_zone_listing(&self, _project: &str) -> Self::Listing {
        self.session("zones".to_string(), &self.zone_pages, |name| Zone::new(name))
    }
}

impl ResourceListing for FakeCloud {
    type Instances = ScriptedPages<InstanceRecord>;
    type Buckets = ScriptedPages<BucketRecord>;

    fn open_instance_listing(&self, _project: &str, zone: &str) -> Self::Instances {
        let pages = self
            .instance_pages
            .get(zone)
            .map(Vec::as_slice)
            .unwrap_or_default();
        self.session(format!("instances:{}", zone), pages, |(name, id)| {
            InstanceRecord {
                name: name.to_string(),
                id,
                zone: String::new(),
            }
        })
    }

    fn open_bucket_listing(&self, _project: &str) -> Self::Buckets {
        self.session("buckets".to_string(), &self.bucket_pages, |name| {
            BucketRecord::new(name)
        })
    }
}

/// Run against `cloud` and capture stdout-equivalent text
pub async fn run_to_string(
    cloud: &FakeCloud,
    options: &gcp_inventory::RunOptions,
) -> (
    Result<gcp_inventory::RunSummary, gcp_inventory::InventoryError>,
    String,
) {
    let ctx = ExecContext::with_token("test-token");
    let mut sink = gcp_inventory::TextSink::new(Vec::new());
    let result = gcp_inventory::run(&ctx, cloud, cloud, options, &mut sink).await;
    let out = String::from_utf8(sink.into_inner()).expect("report is utf-8");
    (result, out)
}
