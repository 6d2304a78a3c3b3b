//! Lazy pagination
//!
//! A [`PageFetcher`] knows how to fetch one page given a continuation token.
//! [`Pager`] turns it into a forward-only sequence of items with a uniform
//! contract: `Ok(Some(item))` for the next item, `Ok(None)` once the service
//! has signalled there are no more pages, and `Err` for a real failure.

use super::context::ExecContext;
use crate::error::ServiceError;
use std::collections::VecDeque;

/// One page of a listing
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Continuation token; `None` or empty means this was the last page
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_page_token: None,
        }
    }

    pub fn more(items: Vec<T>, next_page_token: impl Into<String>) -> Self {
        Self {
            items,
            next_page_token: Some(next_page_token.into()),
        }
    }
}

/// Fetches single pages of one listing session
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    type Item;

    async fn fetch_page(
        &mut self,
        ctx: &ExecContext,
        page_token: Option<&str>,
    ) -> Result<Page<Self::Item>, ServiceError>;
}

#[derive(Debug)]
enum Cursor {
    Start,
    Next(String),
    Done,
}

/// Forward-only, non-restartable item sequence over a [`PageFetcher`]
///
/// Pages are fetched one at a time, only when the buffered items run out.
/// After the last page or after an error the pager is exhausted and keeps
/// returning `Ok(None)`. Dropping the pager releases the fetcher.
pub struct Pager<F: PageFetcher> {
    fetcher: F,
    buffer: VecDeque<F::Item>,
    cursor: Cursor,
    pages_fetched: usize,
}

impl<F: PageFetcher> Pager<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            buffer: VecDeque::new(),
            cursor: Cursor::Start,
            pages_fetched: 0,
        }
    }

    /// Next item, `Ok(None)` when done
    pub async fn next(&mut self, ctx: &ExecContext) -> Result<Option<F::Item>, ServiceError> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }

            let page_token = match &self.cursor {
                Cursor::Done => return Ok(None),
                Cursor::Start => None,
                Cursor::Next(token) => Some(token.as_str()),
            };

            let result = self.fetcher.fetch_page(ctx, page_token).await;
            let page = match result {
                Ok(page) => page,
                Err(e) => {
                    self.cursor = Cursor::Done;
                    return Err(e);
                }
            };

            self.pages_fetched += 1;
            tracing::trace!(
                "page {} fetched: {} items, more: {}",
                self.pages_fetched,
                page.items.len(),
                page.next_page_token.is_some()
            );

            self.buffer.extend(page.items);
            self.cursor = match page.next_page_token {
                Some(token) if !token.is_empty() => Cursor::Next(token),
                _ => Cursor::Done,
            };
        }
    }

    /// Drain the remaining items into a vector
    pub async fn collect(mut self, ctx: &ExecContext) -> Result<Vec<F::Item>, ServiceError> {
        let mut items = Vec::new();
        while let Some(item) = self.next(ctx).await? {
            items.push(item);
        }
        Ok(items)
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    pub fn is_done(&self) -> bool {
        matches!(self.cursor, Cursor::Done) && self.buffer.is_empty()
    }
}
