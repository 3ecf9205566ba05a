// src/specs/spotlight_hour.rs
//! Spotlight Hour: the second paragraph of the description reads like
//! `... Spotlight Hour: The featured Pokémon is Pikachu and the bonus is 2× Catch Candy.`

use scraper::Html;

use crate::core::html::{doc_select_one, text_of};
use crate::core::sanitize::strip_trailing_punct;
use crate::event::{BONUSES_KEY, Content, ContentValue, FEATURED_KEY};

fn after_last_is(s: &str) -> &str {
    s.rsplit(" is ").next().unwrap_or(s).trim()
}

pub fn extract(doc: &Html) -> Content {
    let mut content = Content::new();
    let Some(p) = doc_select_one(doc, "div.event-description p:nth-child(2)") else {
        return content;
    };
    let text = text_of(p);
    let Some((_, sentence)) = text.split_once(": ") else {
        tracing::debug!(%text, "spotlight hour: no ': ' in description");
        return content;
    };

    let mut parts = sentence.split(" and ");
    let featured: Vec<String> = parts
        .next()
        .map(|part| strip_trailing_punct(after_last_is(part)).to_uppercase())
        .filter(|name| !name.is_empty())
        .into_iter()
        .collect();
    let bonuses: Vec<String> = parts
        .next()
        .map(|part| s!(strip_trailing_punct(after_last_is(part))))
        .filter(|b| !b.is_empty())
        .into_iter()
        .collect();

    content.insert(s!(FEATURED_KEY), ContentValue::List(featured));
    content.insert(s!(BONUSES_KEY), ContentValue::List(bonuses));
    content
}
