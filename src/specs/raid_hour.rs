// src/specs/raid_hour.rs
//! Raid Hour: the bosses are in the page title, e.g.
//! `Kyogre and Groudon Raid Hour`.

use scraper::Html;

use crate::core::html::{doc_select_one, text_of};
use crate::event::{Content, ContentValue, FEATURED_KEY};

pub fn extract(doc: &Html) -> Content {
    let mut content = Content::new();
    let Some(title) = doc_select_one(doc, "h1.page-title") else {
        return content;
    };
    let title = text_of(title);
    let head = title.split("Raid").next().unwrap_or("");
    let featured: Vec<String> = head
        .split(" and ")
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();
    content.insert(s!(FEATURED_KEY), ContentValue::List(featured));
    content
}
