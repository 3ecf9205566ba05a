// src/specs/raid_battles.rs
//! Raid Battles detail page.
//!
//! - Table of contents: `div.event-toc a` (minus the graphic link); a `#shiny`
//!   entry means the featured bosses can be shiny.
//! - Bosses: the first `ul.pkmn-list-flex` following the `#raids` heading. The
//!   list sits a variable number of siblings after the heading, so the search
//!   widens one sibling at a time up to `MAX_SIBLING_DEPTH`.

use scraper::{ElementRef, Html};

use crate::config::consts::MAX_SIBLING_DEPTH;
use crate::core::html::{attr, select_all, select_one, text_of};
use crate::core::sanitize::strip_parens;
use crate::event::{Content, ContentValue, FEATURED_KEY, SHINY_KEY};

pub fn extract(doc: &Html) -> Content {
    let root = doc.root_element();

    let toc_ids: Vec<&str> = select_all(root, "div.event-toc a:not(.event-toc-graphic)")
        .into_iter()
        .filter_map(|a| attr(a, "href"))
        .map(|href| href.trim_start_matches('#'))
        .collect();

    let featured: Vec<String> = match find_boss_list(root) {
        Some(ul) => select_all(ul, ".pkmn-name")
            .into_iter()
            .filter_map(|name| boss_id(&text_of(name)))
            .collect(),
        None => {
            tracing::debug!("raid battles: no boss list within {MAX_SIBLING_DEPTH} siblings of #raids");
            Vec::new()
        }
    };

    let mut content = Content::new();
    content.insert(s!(FEATURED_KEY), ContentValue::List(featured));
    content.insert(s!(SHINY_KEY), ContentValue::Flag(toc_ids.contains(&"shiny")));
    content
}

fn find_boss_list(root: ElementRef<'_>) -> Option<ElementRef<'_>> {
    (1..=MAX_SIBLING_DEPTH).find_map(|gap| {
        let css = join!("#raids + ", &"* + ".repeat(gap), "ul.pkmn-list-flex");
        select_one(root, &css)
    })
}

/// `Pikachu (Flying)` → `FLYING_PIKACHU`; `Raichu,` → `RAICHU`.
fn boss_id(raw: &str) -> Option<String> {
    let cleaned = raw.replace(" and ", "").replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    // Put the form qualifier first: "<species> <form>" → "<form>_<species>"
    let reordered = match cleaned.split_once(' ') {
        Some((species, form)) => join!(form, "_", species),
        None => s!(cleaned),
    };
    Some(strip_parens(&reordered).to_uppercase().replace(' ', ""))
}
