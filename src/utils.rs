//! Small string and URL helpers shared by the extractors.

use itertools::Itertools;

/// Resolve `href` against `origin`.
///
/// Absolute links pass through untouched; root-relative links become
/// `origin + href`. Protocol-relative links inherit the origin's scheme and
/// path-relative links are joined with a single slash.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(absolutize("https://kadrovik.uz", "/publish/a"), "https://kadrovik.uz/publish/a");
/// assert_eq!(absolutize("https://kadrovik.uz", "https://x.uz/a"), "https://x.uz/a");
/// ```
pub fn absolutize(origin: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else if let Some(rest) = href.strip_prefix("//") {
        let scheme = origin.split("://").next().unwrap_or("https");
        format!("{scheme}://{rest}")
    } else if href.starts_with('/') {
        format!("{origin}{href}")
    } else {
        format!("{origin}/{href}")
    }
}

/// Join the stripped, non-empty pieces of `pieces` with `separator`.
pub fn normalize_text<'a>(pieces: impl Iterator<Item = &'a str>, separator: &str) -> String {
    pieces
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .join(separator)
}

/// Character count, not byte length.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// First `max` characters of `s`.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Case-insensitive "contains any of" check. `needles` must be lowercase.
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    let lowered = haystack.to_lowercase();
    needles.iter().any(|n| lowered.contains(n))
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at `max` characters and suffixed with the number of
/// bytes dropped.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let head = truncate_chars(s, max);
    if head.len() == s.len() {
        s.to_string()
    } else {
        format!("{}…(+{} bytes)", head, s.len() - head.len())
    }
}
