//! Bookfinder - terminal book search with autocomplete
//!
//! Type a title, pick a suggestion from the dropdown, read the book's details.
//! Suggestions and details come from the Google Books catalog.
//!
//! # Layers
//!
//! - **Suggestion filtering**: case-insensitive, order-preserving title match
//! - **Autocomplete widget**: an event-driven state machine with no I/O
//! - **Controllers**: search and detail state, fed by the catalog client
//! - **TUI**: ratatui front-end wiring input events to the widget
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use bookfinder::{Config, DetailController, GoogleBooksClient, SearchController};
//!
//! #[tokio::main]
//! async fn main() -> bookfinder::Result<()> {
//!     let config = Config::load(None)?;
//!     let api = Arc::new(GoogleBooksClient::new(config.api.clone())?);
//!
//!     let mut search = SearchController::new(api.clone(), config.api.max_results);
//!     for item in search.search("dune").await {
//!         println!("{}: {}", item.id, item.title);
//!     }
//!
//!     let mut detail = DetailController::new(api);
//!     println!("{:?}", detail.load(Some("zyTCAlFPjgYC")).await);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod autocomplete;
pub mod config;
pub mod detail;
pub mod error;
pub mod logging;
pub mod model;
pub mod route;
pub mod sanitize;
pub mod search;
pub mod suggest;
pub mod tui;

// Re-export main types
pub use api::{BooksApi, GoogleBooksClient};
pub use autocomplete::{Autocomplete, Phase, WidgetEffect, WidgetEvent};
pub use config::Config;
pub use detail::{DetailController, DetailState, DetailTicket, FETCH_FAILED};
pub use error::{BookFinderError, ErrorKind, Result};
pub use model::{BookDetail, SearchResultItem, NO_DESCRIPTION};
pub use route::Route;
pub use search::{SearchController, SearchOutcome, SearchTicket};
pub use suggest::filter_suggestions;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
