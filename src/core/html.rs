// src/core/html.rs
//
// Thin helpers over `scraper` so the specs read like the selectors they use.
// A malformed selector is a programming error in a page rule; it is logged and
// treated as "nothing matched" so extraction stays best-effort.

use scraper::{ElementRef, Html, Selector};

use super::sanitize::normalize_ws;

pub fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(e) => {
            tracing::error!(css, error = %e, "invalid selector");
            None
        }
    }
}

pub fn select_one<'a>(root: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let sel = selector(css)?;
    root.select(&sel).next()
}

pub fn select_all<'a>(root: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match selector(css) {
        Some(sel) => root.select(&sel).collect(),
        None => Vec::new(),
    }
}

pub fn doc_select_one<'a>(doc: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    select_one(doc.root_element(), css)
}

/// All descendant text, whitespace-normalized.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}

pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}
