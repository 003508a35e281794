// src/github/link.rs
// =============================================================================
// Parses the HTTP `Link` header GitHub uses for pagination.
//
// Example header (one line in reality):
//   <https://api.github.com/user/583231/repos?per_page=10&page=2>; rel="next",
//   <https://api.github.com/user/583231/repos?per_page=10&page=3>; rel="last"
//
// Each comma-separated entry is a URL in angle brackets followed by
// `;`-separated parameters. We only care whether some entry has a `rel`
// parameter containing "next".
//
// Rust concepts:
// - Iterators and closures: split/trim/find chains instead of index loops
// - Option combinators: strip_prefix, and_then
// =============================================================================

/// Returns true if the `Link` header advertises a `rel="next"` page.
pub fn has_next_page(link_header: &str) -> bool {
    link_header
        .split(',')
        .any(|entry| entry_relations(entry).any(|rel| rel.eq_ignore_ascii_case("next")))
}

// Yields every relation type of one `<url>; rel="a b"` entry.
// `rel` may hold several space-separated values.
fn entry_relations(entry: &str) -> impl Iterator<Item = &str> {
    let mut parts = entry.split(';');

    // The first part must be the <url>; otherwise the entry is malformed
    let url_ok = parts
        .next()
        .map(|url| url.trim().starts_with('<') && url.trim().ends_with('>'))
        .unwrap_or(false);

    parts
        .filter(move |_| url_ok)
        .filter_map(|param| {
            let (key, value) = param.split_once('=')?;
            if key.trim().eq_ignore_ascii_case("rel") {
                Some(value.trim().trim_matches('"'))
            } else {
                None
            }
        })
        .flat_map(str::split_whitespace)
}
