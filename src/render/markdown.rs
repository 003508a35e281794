// src/render/markdown.rs
// =============================================================================
// Renders a PageView as Markdown, and as an HTML page built from that Markdown.
//
// The three regions are wrapped in HTML blocks so the HTML page keeps stable
// ids and classes:
//   <div id="user-info" class="user-card">        profile summary
//   <div id="repositories" ...>                   one .repository-card each
//   <nav id="pagination">                         one .pagination-button each
//
// CommonMark passes a line like `<div class="x">` through as raw HTML and ends
// that block at the next blank line, so the Markdown between the opening and
// closing tags is still rendered normally.
//
// Everything that comes from the API is escaped before it goes into the
// document: text with backslash escapes, URLs inside <...> destinations.
//
// Rust concepts:
// - pulldown-cmark: Parser + html::push_html to turn Markdown into HTML
// =============================================================================

use anyhow::Result;
use pulldown_cmark::{escape::escape_html, html, Options, Parser};

use super::{page_controls, NO_BIO, NO_DESCRIPTION, NO_LOCATION};
use crate::github::User;
use crate::search::{PageView, RepositoryCard};

pub fn render_markdown(view: &PageView) -> String {
    let mut blocks: Vec<String> = Vec::new();

    blocks.push(r#"<div id="user-info" class="user-card">"#.to_string());
    blocks.extend(user_blocks(&view.user));
    blocks.push("</div>".to_string());

    blocks.push(r#"<div id="repositories" class="repositories-container">"#.to_string());
    blocks.push(repository_summary(view));
    for card in &view.repositories {
        blocks.extend(card_blocks(card));
    }
    blocks.push("</div>".to_string());

    let controls = page_controls(view);
    if !controls.is_empty() {
        // A single HTML block: no blank lines inside
        let mut nav = vec![r#"<nav id="pagination">"#.to_string()];
        for control in controls {
            if control.current {
                nav.push(format!(
                    r#"<button class="pagination-button current" aria-current="page">{}</button>"#,
                    control.number
                ));
            } else {
                nav.push(format!(
                    r#"<button class="pagination-button">{}</button>"#,
                    control.number
                ));
            }
        }
        nav.push("</nav>".to_string());
        blocks.push(nav.join("\n"));
    }

    let mut markdown = blocks.join("\n\n");
    markdown.push('\n');
    markdown
}

/// A standalone HTML page with the same regions as the Markdown report.
pub fn render_html(view: &PageView) -> Result<String> {
    let markdown = render_markdown(view);

    let mut body = String::new();
    html::push_html(&mut body, Parser::new_ext(&markdown, Options::empty()));

    let mut title = String::new();
    escape_html(&mut title, view.user.display_name())?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - GitHub Lookup</title>
<style>
body {{ font-family: sans-serif; max-width: 60rem; margin: 2rem auto; }}
.user-card img {{ width: 6rem; border-radius: 50%; }}
.repository-card {{ border: 1px solid #ddd; border-radius: 6px; padding: 0 1rem; margin: 1rem 0; }}
.languages-container code {{ background: #eef; border-radius: 4px; padding: 0.1rem 0.4rem; }}
.pagination-button.current {{ font-weight: bold; }}
</style>
</head>
<body>
{body}</body>
</html>
"#
    ))
}

fn user_blocks(user: &User) -> Vec<String> {
    let mut blocks = vec![
        format!("![Profile Image]({})", destination(&user.avatar_url)),
        format!("## {}", escape_text(user.display_name())),
        escape_text(user.bio.as_deref().unwrap_or(NO_BIO)),
        format!(
            "**Location:** {}",
            escape_text(user.location.as_deref().unwrap_or(NO_LOCATION))
        ),
    ];

    if let Some(blog) = &user.blog {
        blocks.push(format!(
            "**Blog:** [{}]({})",
            escape_text(blog),
            destination(blog)
        ));
    }

    blocks.push(format!(
        "**GitHub:** [{}]({})",
        escape_text(&user.login),
        destination(&user.html_url)
    ));

    blocks
}

fn repository_summary(view: &PageView) -> String {
    match view.page {
        Some(page) if view.total_pages > 0 => format!(
            "**{} repositories** (page {} of {})",
            view.total_repositories, page, view.total_pages
        ),
        _ => format!("**{} repositories**", view.total_repositories),
    }
}

fn card_blocks(card: &RepositoryCard) -> Vec<String> {
    let repo = &card.repository;

    let mut blocks = vec![
        r#"<div class="repository-card">"#.to_string(),
        format!(
            "### [{}]({})",
            escape_text(&repo.name),
            destination(&repo.html_url)
        ),
        escape_text(repo.description.as_deref().unwrap_or(NO_DESCRIPTION)),
        "**Language:**".to_string(),
        r#"<div class="languages-container">"#.to_string(),
    ];

    if !card.languages.is_empty() {
        let tags: Vec<String> = card
            .languages
            .names()
            .iter()
            .map(|name| code_span(name))
            .collect();
        blocks.push(tags.join(" "));
    }

    blocks.push("</div>".to_string());
    blocks.push(format!("**Stars:** {}", repo.stargazers_count));
    blocks.push(format!("**Forks:** {}", repo.forks_count));
    blocks.push("</div>".to_string());
    blocks
}

// Backslash-escapes ASCII punctuation and folds whitespace (including
// newlines) so API text can't start new blocks or inject markup.
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for (i, word) in text.split_whitespace().enumerate() {
        if i > 0 {
            escaped.push(' ');
        }
        for c in word.chars() {
            if c.is_ascii_punctuation() {
                escaped.push('\\');
            }
            escaped.push(c);
        }
    }
    escaped
}

// An inline code span that holds `text` unchanged. The fence is one backtick
// longer than the longest run inside; padding spaces keep a leading or
// trailing backtick from merging with the fence and are stripped by the parser.
fn code_span(text: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in text.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }

    if longest == 0 {
        return format!("`{text}`");
    }
    let fence = "`".repeat(longest + 1);
    format!("{fence} {text} {fence}")
}

// A link destination in <...> form, with the characters that would end it
// percent-encoded.
fn destination(url: &str) -> String {
    let mut out = String::from("<");
    for c in url.trim().chars() {
        match c {
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            '\\' => out.push_str("%5C"),
            c if c.is_whitespace() => out.push_str("%20"),
            c => out.push(c),
        }
    }
    out.push('>');
    out
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does html::push_html do?
//    - Walks the events from pulldown_cmark::Parser and appends HTML to a
//      String
//    - Raw HTML lines like <div ...> are copied through as they are
//
// 2. Why escape text with backslashes instead of HTML entities?
//    - The text goes into Markdown first; a backslash before punctuation
//      makes the parser treat it as a plain character
//    - The HTML writer then escapes <, > and & on its own
//
// 3. What is r#"..."#?
//    - A raw string: quotes and backslashes inside need no escaping
// -----------------------------------------------------------------------------
