pub mod app;
pub mod colors;
pub mod search;
pub mod ui;

use std::io::stdout;
use std::sync::Arc;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::api::{BooksApi, GoogleBooksClient};
use crate::config::Config;

/// Entry point: run the interactive search and detail screens
pub fn run(config: Config) -> crate::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let api: Arc<dyn BooksApi> = Arc::new(GoogleBooksClient::new(config.api.clone())?);

    let mut terminal = ratatui::init();
    if let Err(e) = execute!(stdout(), EnableMouseCapture) {
        ratatui::restore();
        return Err(e.into());
    }

    tracing::info!("Bookfinder TUI started");
    let mut app = app::App::new(config, api, runtime.handle().clone());
    let result = app.run(&mut terminal);

    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    tracing::info!("Bookfinder TUI stopped");

    // Pending request tasks have nowhere to report to; don't wait for them.
    runtime.shutdown_background();
    result
}
