// src/render/mod.rs
// =============================================================================
// Turns a PageView into output. Every renderer returns a String; printing or
// writing it to a file is up to the caller.
//
// Submodules:
// - text: Human-readable terminal report (the default)
// - markdown: Markdown report, and the HTML page built from it
//
// Each format shows the same three regions:
// 1. User info (name, bio, location, blog, profile link)
// 2. One card per repository (name, description, languages, stars, forks)
// 3. Page controls, one per page
// =============================================================================

mod markdown;
mod text;

use anyhow::Result;

use crate::cli::OutputFormat;
use crate::search::PageView;

pub use markdown::{render_html, render_markdown};
pub use text::render_text;

pub const NO_BIO: &str = "No bio available.";
pub const NO_LOCATION: &str = "Not specified";
pub const NO_DESCRIPTION: &str = "No description available.";

pub fn render(view: &PageView, format: OutputFormat) -> Result<String> {
    let output = match format {
        OutputFormat::Text => render_text(view),
        OutputFormat::Json => serde_json::to_string_pretty(view)?,
        OutputFormat::Markdown => render_markdown(view),
        OutputFormat::Html => render_html(view)?,
    };
    Ok(output)
}

/// One page button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControl {
    pub number: usize,
    pub current: bool,
}

/// Controls for pages 1..=total_pages, marking the one being shown.
pub fn page_controls(view: &PageView) -> Vec<PageControl> {
    (1..=view.total_pages)
        .map(|number| PageControl {
            number,
            current: view.page == Some(number),
        })
        .collect()
}
