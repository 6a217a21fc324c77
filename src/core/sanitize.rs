// src/core/sanitize.rs

/// Collapse whitespace runs (newlines included) to a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Text destined for a `|`-delimited field: `|` becomes `-`.
pub fn field_text(s: &str) -> String {
    s.replace('|', "-")
}

/// Treat the string as an absolute link only if it already carries a scheme we fetch.
pub fn is_absolute_http(href: &str) -> bool {
    href.starts_with("http")
}
