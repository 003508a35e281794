// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging and load the configuration
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = user-facing problem, 2 = error)
//
// Exit code 1 covers the problems a user can fix: an empty username, a user
// that could not be fetched, a page that doesn't exist. Exit code 2 is for
// everything else (bad config file, output file not writable, ...).
//
// Rust concepts used:
// - async/await: Network requests without blocking
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use github_lookup::busy::BusyIndicator;
use github_lookup::cli::{Cli, Commands, OutputFormat};
use github_lookup::config::Config;
use github_lookup::github::GitHubClient;
use github_lookup::search::SearchController;
use github_lookup::{interactive, render};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let config = Config::load(cli.config.as_deref())?
        .with_overrides(cli.api_url.clone(), cli.concurrency)?;
    tracing::debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Search {
            username,
            page,
            all,
            format,
            output,
        } => handle_search(&config, &username, page, all, format, output.as_deref()).await,
        Commands::Interactive => handle_interactive(&config).await,
    }
}

// Logs go to stderr so they never mix with the report on stdout.
// RUST_LOG wins over -v/-q when it is set.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("github_lookup={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

// Spinner only when a person is watching stderr
fn busy_indicator() -> BusyIndicator {
    if std::io::stderr().is_terminal() {
        BusyIndicator::spinner("Fetching from GitHub...")
    } else {
        BusyIndicator::hidden()
    }
}

fn controller(config: &Config) -> Result<SearchController> {
    let client = GitHubClient::new(config, busy_indicator())
        .context("Failed to create HTTP client")?;
    Ok(SearchController::new(client, config))
}

// Handles the 'search' subcommand
async fn handle_search(
    config: &Config,
    username: &str,
    page: usize,
    all: bool,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<i32> {
    let controller = controller(config)?;

    let result = if all {
        controller.search_all(username).await
    } else {
        controller.search_page(username, page).await
    };

    let view = match result {
        Ok(view) => view,
        Err(e) => {
            eprintln!("⚠️  {}", e);
            return Ok(1);
        }
    };

    let mut rendered = render::render(&view, format)?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "📄 Wrote {} of {} repositories to {}",
                view.repositories.len(),
                view.total_repositories,
                path.display()
            );
        }
        None => print!("{}", rendered),
    }

    Ok(0)
}

// Handles the 'interactive' subcommand
async fn handle_interactive(config: &Config) -> Result<i32> {
    let controller = controller(config)?;

    println!("🔍 GitHub lookup. Type a username to search, or :help for commands.");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    interactive::run(&controller, stdin, std::io::stdout()).await?;

    Ok(0)
}
