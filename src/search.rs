//! Search controller: owns the suggestion list and the loading flag
//!
//! Requests are tagged with a sequence number. A response is applied only if
//! it is newer than the last applied one, so a slow early query can never
//! overwrite results for a later one.

use std::sync::Arc;

use crate::api::BooksApi;
use crate::model::SearchResultItem;
use crate::Result;

/// Handle for one in-flight search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: String,
    pub max_results: usize,
}

/// What happened when a response was handed back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The result list was replaced
    Applied,
    /// A newer response had already been applied; this one was dropped
    Stale,
    /// The request failed; the previous list is kept
    Failed,
}

pub struct SearchController {
    api: Arc<dyn BooksApi>,
    max_results: usize,
    results: Vec<SearchResultItem>,
    next_seq: u64,
    applied_seq: u64,
    in_flight: usize,
}

impl SearchController {
    pub fn new(api: Arc<dyn BooksApi>, max_results: usize) -> Self {
        Self {
            api,
            max_results,
            results: Vec::new(),
            next_seq: 1,
            applied_seq: 0,
            in_flight: 0,
        }
    }

    /// Current option list
    pub fn results(&self) -> &[SearchResultItem] {
        &self.results
    }

    /// True while any request is outstanding
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn api(&self) -> Arc<dyn BooksApi> {
        Arc::clone(&self.api)
    }

    /// Start a search. Blank queries are ignored and return `None`.
    pub fn begin(&mut self, query: &str) -> Option<SearchTicket> {
        if query.trim().is_empty() {
            return None;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight += 1;

        tracing::debug!(seq, query, "search started");

        Some(SearchTicket {
            seq,
            query: query.to_string(),
            max_results: self.max_results,
        })
    }

    /// Hand back the result of the request started by `ticket`.
    pub fn complete(
        &mut self,
        ticket: &SearchTicket,
        result: Result<Vec<SearchResultItem>>,
    ) -> SearchOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);

        match result {
            Ok(items) if ticket.seq > self.applied_seq => {
                tracing::info!(seq = ticket.seq, query = %ticket.query, count = items.len(), "search results applied");
                self.applied_seq = ticket.seq;
                self.results = items;
                SearchOutcome::Applied
            }
            Ok(_) => {
                tracing::debug!(
                    seq = ticket.seq,
                    applied = self.applied_seq,
                    "discarding stale search response"
                );
                SearchOutcome::Stale
            }
            Err(e) => {
                tracing::error!(query = %ticket.query, kind = ?e.kind(), error = %e, "Error fetching books");
                SearchOutcome::Failed
            }
        }
    }

    /// Run one search to completion and return the list afterwards.
    pub async fn search(&mut self, query: &str) -> &[SearchResultItem] {
        if let Some(ticket) = self.begin(query) {
            let result = self.api.search(&ticket.query, ticket.max_results).await;
            self.complete(&ticket, result);
        }
        &self.results
    }
}
