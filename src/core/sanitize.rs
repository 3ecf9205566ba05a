// src/core/sanitize.rs

/// Collapse whitespace runs into single spaces and trim.
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

/// Drop `(` and `)` but keep what they enclose: `(Flying)` → `Flying`.
pub fn strip_parens(s: &str) -> String {
    s.chars().filter(|c| !matches!(c, '(' | ')')).collect()
}

/// Remove trailing sentence punctuation and whitespace.
pub fn strip_trailing_punct(s: &str) -> &str {
    s.trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '.' | '!' | '?' | ',' | ';' | ':'))
}

/// Last path segment of a URL, without query/fragment; `None` if nothing usable.
pub fn file_name_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or("");
    let name = path.rsplit('/').next().unwrap_or("").trim();
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') { out.push(ch); }
        else { out.push('_'); }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() || out.chars().all(|c| c == '.') { None } else { Some(out) }
}
