// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// Options marked `global = true` can be given before or after the subcommand
#[derive(Parser, Debug)]
#[command(
    name = "github-lookup",
    version,
    about = "Look up a GitHub user and browse their repositories",
    long_about = "github-lookup fetches a GitHub user's profile and every one of their \
                  repositories, then shows them ten at a time with their languages, \
                  stars and forks."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a TOML config file (default: <config dir>/github-lookup/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the GitHub API (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// How many language lookups may run at once (overrides the config file)
    #[arg(long, global = true)]
    pub concurrency: Option<usize>,

    /// More log output (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

// Our subcommands (search, interactive)
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up one user and print a page of their repositories
    ///
    /// Example: github-lookup search octocat --page 2
    Search {
        /// GitHub username to look up
        username: String,

        /// Which page of repositories to show (10 per page)
        #[arg(long, default_value_t = 1, conflicts_with = "all")]
        page: usize,

        /// Show every repository instead of a single page
        #[arg(long)]
        all: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write the output to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Search repeatedly and flip through pages from a prompt
    ///
    /// Type a username to search, then :page N, :next, :prev, :help or :quit
    Interactive,
}

/// How results are printed
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// Pretty-printed JSON
    Json,
    /// Markdown document
    Markdown,
    /// Standalone HTML page
    Html,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does `global = true` do?
//    - The option belongs to the top-level command but may be written after
//      the subcommand too: `github-lookup search octocat -v`
//
// 2. What is ArgAction::Count?
//    - Each repetition of the flag adds one: -v = 1, -vv = 2
//
// 3. What is ValueEnum?
//    - Lets clap parse a fixed set of words (text, json, ...) into an enum
//    - `--help` lists the allowed values automatically
//
// 4. Why Option<PathBuf>?
//    - None means "the flag wasn't given", which is different from any path
// -----------------------------------------------------------------------------
