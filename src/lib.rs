// src/lib.rs
// =============================================================================
// Library root. The binary in main.rs is a thin wrapper around these modules.
//
// Modules, in the order a search passes through them:
// - cli / config: What to do and how to reach the API
// - github: User lookup, repository pages, language tags
// - search: Runs searches, keeps the last result, pages through it
// - render: Text, JSON, Markdown and HTML output
// - interactive: The prompt
// - busy: Shared loading indicator
// =============================================================================

pub mod busy;
pub mod cli;
pub mod config;
pub mod github;
pub mod interactive;
pub mod render;
pub mod search;
