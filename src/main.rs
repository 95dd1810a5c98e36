//! Bookfinder CLI
//!
//! Interactive autocomplete search by default, plus one-shot commands for
//! searching and showing a single volume.

use bookfinder::logging::{self, LogTarget};
use bookfinder::sanitize::description_to_text;
use bookfinder::{
    BookFinderError, BooksApi, Config, DetailController, DetailState, GoogleBooksClient, Route,
    SearchController,
};
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Bookfinder - search the Google Books catalog from your terminal
#[derive(Parser)]
#[command(name = "bookfinder")]
#[command(author = "Bookfinder Contributors")]
#[command(version)]
#[command(about = "Book search with autocomplete suggestions", long_about = None)]
struct Cli {
    /// Config file (default: $BOOKFINDER_CONFIG_PATH or ~/.bookfinder/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive search with suggestions (default)
    Tui,

    /// Search the catalog and print matching titles
    Search {
        /// Search text (use -- before it if it starts with -)
        #[arg(allow_hyphen_values = true)]
        query: String,

        /// Maximum results (default: api.max_results from config)
        #[arg(short, long)]
        max: Option<usize>,
    },

    /// Show details for one volume
    Book {
        /// Volume identifier, or a route such as /book/<id>
        id: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    let log_target = match command {
        Commands::Tui => LogTarget::default_file(),
        _ => LogTarget::Stderr,
    };
    if let Err(e) = logging::init(&log_target) {
        eprintln!("{} {}", style("Warning:").yellow().bold(), e);
    }

    let result = Config::load(cli.config.as_deref()).and_then(|config| match command {
        Commands::Tui => bookfinder::tui::run(config),
        Commands::Search { query, max } => cmd_search(config, &query, max),
        Commands::Book { id } => cmd_book(config, &id),
    });

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn client(config: &Config) -> bookfinder::Result<Arc<dyn BooksApi>> {
    Ok(Arc::new(GoogleBooksClient::new(config.api.clone())?))
}

/// Search command implementation
fn cmd_search(config: Config, query: &str, max: Option<usize>) -> bookfinder::Result<()> {
    if query.trim().is_empty() {
        println!("{} Nothing to search for", style("→").cyan().bold());
        return Ok(());
    }

    let max_results = max.unwrap_or(config.api.max_results);
    if max_results == 0 || max_results > bookfinder::config::MAX_RESULTS_LIMIT {
        return Err(BookFinderError::Config(format!(
            "--max must be between 1 and {}",
            bookfinder::config::MAX_RESULTS_LIMIT
        )));
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let mut search = SearchController::new(client(&config)?, max_results);

    let start = Instant::now();
    let pb = spinner(format!("Searching for '{}'...", query));

    // Called directly rather than through `search()` so a failure reaches the
    // user instead of only the log.
    if let Some(ticket) = search.begin(query) {
        match runtime.block_on(search.api().search(&ticket.query, ticket.max_results)) {
            Ok(items) => {
                search.complete(&ticket, Ok(items));
            }
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        }
    }
    pb.finish_and_clear();

    let results = search.results();
    println!(
        "Found {} results in {:.2}s:",
        style(results.len()).green(),
        start.elapsed().as_secs_f64()
    );
    println!();

    for (i, item) in results.iter().enumerate() {
        println!(
            "  {} {} {}",
            style(format!("{:3}.", i + 1)).dim(),
            style(&item.title).cyan(),
            style(format!("({})", item.id)).dim()
        );
    }

    Ok(())
}

/// Book command implementation
fn cmd_book(config: Config, id: &str) -> bookfinder::Result<()> {
    let route = if id.starts_with('/') {
        Route::parse(id)?
    } else {
        Route::book(id)
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let mut detail = DetailController::new(client(&config)?);

    let pb = spinner(format!("Loading {}...", route));
    let state = runtime.block_on(detail.load(route.book_id())).clone();
    pb.finish_and_clear();

    match state {
        DetailState::Loading => {
            println!("{} No book identifier given", style("→").cyan().bold());
        }
        DetailState::NotFound => {
            println!("{}", style("Book not found").yellow());
        }
        DetailState::Error(message) => {
            println!("{}", style(message).red());
        }
        DetailState::Loaded(book) => {
            println!("{}", style(&book.title).bold());
            if let Some(authors) = book.authors_line() {
                println!("{} {}", style("by").dim(), authors);
            }
            println!();
            if book.has_image() && config.images.is_allowed(&book.image_url) {
                println!("{} {}", style("Cover:").dim(), book.image_url);
            } else {
                println!("{}", style("No image available").dim());
            }
            println!();
            println!("{}", description_to_text(&book.description));
        }
    }

    Ok(())
}
