// src/render/text.rs
// =============================================================================
// Renders a PageView as a plain terminal report.
//
// Example:
//   👤 The Octocat (octocat)
//      🖼  Avatar:   https://avatars.githubusercontent.com/u/583231
//      No bio available.
//      📍 Location: San Francisco
//      🐙 GitHub:   octocat - https://github.com/octocat
//
//   📦 25 repositories (page 1 of 3)
//
//     Hello-World - https://github.com/octocat/Hello-World
//        My first repository on GitHub!
//        Languages: Ruby, Shell
//        ⭐ Stars: 1500   🍴 Forks: 1400
//
//   📄 Pages: [1] 2 3
// =============================================================================

use std::fmt::Write;

use super::{page_controls, NO_BIO, NO_DESCRIPTION, NO_LOCATION};
use crate::github::User;
use crate::search::{PageView, RepositoryCard};

pub fn render_text(view: &PageView) -> String {
    let mut out = String::new();

    write_user(&mut out, &view.user);
    out.push('\n');

    let _ = match view.page {
        Some(page) if view.total_pages > 0 => writeln!(
            out,
            "📦 {} repositories (page {} of {})",
            view.total_repositories, page, view.total_pages
        ),
        _ => writeln!(out, "📦 {} repositories", view.total_repositories),
    };

    for card in &view.repositories {
        out.push('\n');
        write_card(&mut out, card);
    }

    let controls = page_controls(view);
    if !controls.is_empty() {
        let labels: Vec<String> = controls
            .iter()
            .map(|c| {
                if c.current {
                    format!("[{}]", c.number)
                } else {
                    c.number.to_string()
                }
            })
            .collect();
        let _ = writeln!(out, "\n📄 Pages: {}", labels.join(" "));
    }

    out
}

// Writing to a String can't fail, so the fmt::Result values are ignored
fn write_user(out: &mut String, user: &User) {
    let _ = writeln!(out, "👤 {} ({})", user.display_name(), user.login);
    let _ = writeln!(out, "   🖼  Avatar:   {}", user.avatar_url);
    let _ = writeln!(out, "   {}", user.bio.as_deref().unwrap_or(NO_BIO));
    let _ = writeln!(
        out,
        "   📍 Location: {}",
        user.location.as_deref().unwrap_or(NO_LOCATION)
    );
    if let Some(blog) = &user.blog {
        let _ = writeln!(out, "   🔗 Blog:     {}", blog);
    }
    let _ = writeln!(out, "   🐙 GitHub:   {} - {}", user.login, user.html_url);
}

fn write_card(out: &mut String, card: &RepositoryCard) {
    let repo = &card.repository;
    let _ = writeln!(out, "  {} - {}", repo.name, repo.html_url);
    let _ = writeln!(
        out,
        "     {}",
        repo.description.as_deref().unwrap_or(NO_DESCRIPTION)
    );
    let _ = writeln!(
        out,
        "     Languages: {}",
        card.languages.names().join(", ")
    );
    let _ = writeln!(
        out,
        "     ⭐ Stars: {}   🍴 Forks: {}",
        repo.stargazers_count, repo.forks_count
    );
}
