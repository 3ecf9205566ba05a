// src/specs/listing.rs
//! Scraping spec for the `/events/` index page.
//!
//! Purpose:
//! - Read the two containers `div.current-events` and `div.upcoming-events`.
//! - Turn each `span.event-header-item-wrapper` into an `EventStub`: name,
//!   raw dates, category, detail-page URL and banner URL.
//!
//! Non-responsibilities:
//! - No fetching of detail pages (the scrape loop does that).
//! - No date normalization beyond "has it already ended?".
//!
//! A missing container means the layout changed: that is the one fatal error.

use scraper::{ElementRef, Html};

use crate::config::consts::{EVENTS_PATH_PREFIX, EVENTS_URL, IMG_CDN_PREFIX, SITE_ROOT};
use crate::core::html::{attr, doc_select_one, has_class, select_all, select_one, text_of};
use crate::error::{Error, Result};
use crate::event::{Content, Event, EventType, parse_event_date};
use crate::time::Moment;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Current,
    Upcoming,
}

impl Section {
    fn container(self) -> &'static str {
        match self {
            Section::Current => "body div.page-content div.current-events",
            Section::Upcoming => "body div.page-content div.upcoming-events",
        }
    }

    /// Current events publish their real start under a separate attribute.
    fn start_attr(self) -> &'static str {
        match self {
            Section::Current => "data-event-start-date-check",
            Section::Upcoming => "data-event-start-date",
        }
    }
}

/// What the index page says about one event, before its detail page is read.
#[derive(Clone, Debug, PartialEq)]
pub struct EventStub {
    pub section: Section,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub localtime: bool,
    pub event_type: EventType,
    pub url: String,
    pub img_url: String,
}

impl EventStub {
    pub fn into_event(self, content: Content) -> Result<Event> {
        Event::new(
            self.name,
            &self.start_date,
            &self.end_date,
            self.localtime,
            self.event_type,
            content,
            self.url,
            self.img_url,
        )
    }
}

pub const WRAPPER: &str = "span.event-header-item-wrapper";

/// Parse the index page. Events that already ended at `now` are dropped.
pub fn parse_listing(doc: &Html, now: Moment) -> Result<Vec<EventStub>> {
    let current = doc_select_one(doc, Section::Current.container());
    let upcoming = doc_select_one(doc, Section::Upcoming.container());
    let (Some(current), Some(upcoming)) = (current, upcoming) else {
        return Err(Error::PageStructure(s!("current/upcoming event containers not found")));
    };

    let current_items = select_all(current, WRAPPER);
    let upcoming_items = select_all(upcoming, WRAPPER);
    tracing::info!(
        current = current_items.len(),
        upcoming = upcoming_items.len(),
        "processing listed events"
    );

    let mut out = Vec::with_capacity(current_items.len() + upcoming_items.len());
    for (section, items) in [(Section::Current, current_items), (Section::Upcoming, upcoming_items)] {
        for item in items {
            if let Some(stub) = parse_item(section, item, now) {
                out.push(stub);
            }
        }
    }
    Ok(out)
}

fn parse_item(section: Section, item: ElementRef<'_>, now: Moment) -> Option<EventStub> {
    let (Some(h5), Some(a)) = (select_one(item, "h5"), select_one(item, "a")) else {
        tracing::warn!("event entry without h5/a markup; skipping");
        return None;
    };
    if !has_class(a, "hide-event") {
        return None;
    }

    let localtime = attr(h5, "data-event-local-time")
        .is_some_and(|v| !v.is_empty() && !v.eq_ignore_ascii_case("false"));

    let href = attr(a, "href")?;
    let slug = href.strip_prefix(EVENTS_PATH_PREFIX).unwrap_or(href.trim_start_matches('/'));
    let url = join!(EVENTS_URL, slug);

    let name = select_one(a, "h2").map(text_of).unwrap_or_default();
    let wrapper = select_one(a, "div.event-item-wrapper");
    let Some(label) = wrapper.and_then(|w| select_one(w, "p")).map(text_of) else {
        tracing::warn!(%url, "event entry without a category label; skipping");
        return None;
    };
    let event_type = EventType::from_label(&label);

    let img_url = wrapper
        .and_then(|w| select_one(w, "img"))
        .and_then(|img| attr(img, "src"))
        .map(|src| {
            let path = src.strip_prefix(IMG_CDN_PREFIX).unwrap_or(src.trim_start_matches('/'));
            join!(SITE_ROOT, path)
        })
        .unwrap_or_default();

    let Some(start_date) = attr(h5, section.start_attr()) else {
        tracing::warn!(%url, "event entry without a start date; skipping");
        return None;
    };
    let end_date = attr(h5, "data-event-end-date").unwrap_or(start_date);

    // Unparseable dates are left for record construction to report.
    if let Ok(end) = parse_event_date(end_date) {
        if end < now {
            tracing::debug!(%name, "event already ended; skipping");
            return None;
        }
    }

    Some(EventStub {
        section,
        name,
        start_date: s!(start_date),
        end_date: s!(end_date),
        localtime,
        event_type,
        url,
        img_url,
    })
}
