//! Book catalog access
//!
//! Controllers talk to the catalog through the [`BooksApi`] trait so the
//! HTTP client can be swapped for an in-memory fake in tests.

use async_trait::async_trait;

use crate::model::{BookDetail, SearchResultItem};
use crate::Result;

pub mod google;

pub use google::GoogleBooksClient;

/// Remote book catalog
#[async_trait]
pub trait BooksApi: Send + Sync {
    /// Look up volumes matching `query`, at most `max_results` of them.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResultItem>>;

    /// Fetch one volume. `Ok(None)` means the request succeeded but the
    /// payload carried no record.
    async fn volume(&self, id: &str) -> Result<Option<BookDetail>>;
}
