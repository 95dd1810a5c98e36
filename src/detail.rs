//! Detail controller: loads one volume when the detail screen is entered

use std::sync::Arc;

use crate::api::BooksApi;
use crate::model::BookDetail;
use crate::Result;

/// Message shown for any failed detail request
pub const FETCH_FAILED: &str = "Failed to fetch book details.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Loaded(BookDetail),
    NotFound,
    Error(String),
}

/// Handle for one in-flight detail request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    pub seq: u64,
    pub id: String,
}

pub struct DetailController {
    api: Arc<dyn BooksApi>,
    state: DetailState,
    current: Option<DetailTicket>,
    next_seq: u64,
}

impl DetailController {
    pub fn new(api: Arc<dyn BooksApi>) -> Self {
        Self {
            api,
            state: DetailState::Loading,
            current: None,
            next_seq: 1,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Identifier of the request whose answer is still wanted
    pub fn pending_id(&self) -> Option<&str> {
        self.current.as_ref().map(|t| t.id.as_str())
    }

    /// Enter the page for `id`. Always resets to `Loading`; without an id no
    /// request is made and the state stays `Loading`.
    pub fn enter(&mut self, id: Option<&str>) -> Option<DetailTicket> {
        self.state = DetailState::Loading;
        self.current = None;

        let id = match id {
            Some(id) if !id.is_empty() => id,
            _ => {
                tracing::warn!("detail page entered without an identifier");
                return None;
            }
        };

        let ticket = DetailTicket {
            seq: self.next_seq,
            id: id.to_string(),
        };
        self.next_seq += 1;
        self.current = Some(ticket.clone());

        tracing::debug!(seq = ticket.seq, id, "detail fetch started");
        Some(ticket)
    }

    /// Hand back the result for `ticket`. Returns false if the ticket is no
    /// longer current and the result was dropped.
    pub fn complete(&mut self, ticket: &DetailTicket, result: Result<Option<BookDetail>>) -> bool {
        if self.current.as_ref() != Some(ticket) {
            tracing::debug!(seq = ticket.seq, id = %ticket.id, "discarding stale detail response");
            return false;
        }
        self.current = None;

        self.state = match result {
            Ok(Some(detail)) => {
                tracing::info!(id = %ticket.id, title = %detail.title, "book details loaded");
                DetailState::Loaded(detail)
            }
            Ok(None) => {
                tracing::info!(id = %ticket.id, "book not found");
                DetailState::NotFound
            }
            Err(e) => {
                tracing::error!(id = %ticket.id, kind = ?e.kind(), error = %e, "Error fetching book details");
                DetailState::Error(FETCH_FAILED.to_string())
            }
        };
        true
    }

    /// Leave the page: drop the record and forget any pending request.
    pub fn leave(&mut self) {
        self.state = DetailState::Loading;
        self.current = None;
    }

    /// Enter the page for `id` and wait for the record.
    pub async fn load(&mut self, id: Option<&str>) -> &DetailState {
        if let Some(ticket) = self.enter(id) {
            let result = self.api.volume(&ticket.id).await;
            self.complete(&ticket, result);
        }
        &self.state
    }
}
