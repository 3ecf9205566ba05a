// src/specs/mod.rs
//! # Page "specs"
//!
//! Each spec knows where the ground truth lives in one leekduck page layout and
//! how to pull it out. The category rules turn an event's detail page into its
//! `Content` payload; `listing` reads the `/events/` index into stubs.
//!
//! Category rules are best-effort by contract: missing markup yields an empty
//! or partial payload, never an error. Only the listing spec can fail, and only
//! when the page containers themselves are gone.
//!
//! Fetching, caching and deciding *when* to scrape live elsewhere
//! (`scrape`, `store`, `refresh`). Specs are pure functions over parsed HTML so
//! they can be tested against inline fixtures.

pub mod community_day;
pub mod listing;
pub mod raid_battles;
pub mod raid_hour;
pub mod spotlight_hour;

use scraper::Html;

use crate::event::{Content, EventType};

pub type Extractor = fn(&Html) -> Content;

fn season(_doc: &Html) -> Content {
    Content::new()
}

/// Category → rule. Uncategorized listings have no rule.
pub fn extractor_for(event_type: &EventType) -> Option<Extractor> {
    match event_type {
        EventType::RaidBattles => Some(raid_battles::extract),
        EventType::RaidHour => Some(raid_hour::extract),
        EventType::SpotlightHour => Some(spotlight_hour::extract),
        EventType::CommunityDay => Some(community_day::extract),
        EventType::Season => Some(season),
        EventType::Other(_) => None,
    }
}

pub fn extract_content(event_type: &EventType, doc: &Html) -> Content {
    extractor_for(event_type).map(|rule| rule(doc)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_rule() {
        for t in EventType::all() {
            assert!(extractor_for(&t).is_some(), "{t} has no extractor");
        }
        assert!(extractor_for(&EventType::Other(s!("EVENT"))).is_none());
    }

    #[test]
    fn season_and_unknown_are_empty() {
        let doc = Html::parse_document("<h1 class=\"page-title\">Season of Light</h1>");
        assert!(extract_content(&EventType::Season, &doc).is_empty());
        assert!(extract_content(&EventType::Other(s!("EVENT")), &doc).is_empty());
    }
}
