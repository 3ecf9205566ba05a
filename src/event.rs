// src/event.rs
//! One scraped event, finalized at construction.
//!
//! Dates are kept as canonical `YYYY-MM-DD HH:MM:SS` strings (the storage form)
//! alongside the parsed instants. There are no setters: a record is rebuilt,
//! never edited.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::consts::ISO_DATE_FORMAT;
use crate::error::{Error, Result};
use crate::time::Moment;

pub const FEATURED_KEY: &str = "featuredPokemons";
pub const SHINY_KEY: &str = "shinyEnabled";
pub const BONUSES_KEY: &str = "bonuses";

/* ---------------- Category ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    SpotlightHour,
    RaidHour,
    RaidBattles,
    CommunityDay,
    Season,
    /// Any other listing label, kept verbatim (`EVENT`, `GO_BATTLE_LEAGUE`, …).
    Other(String),
}

impl EventType {
    pub fn all() -> [EventType; 5] {
        [
            EventType::SpotlightHour,
            EventType::RaidHour,
            EventType::RaidBattles,
            EventType::CommunityDay,
            EventType::Season,
        ]
    }

    pub fn raids() -> [EventType; 2] {
        [EventType::RaidHour, EventType::RaidBattles]
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventType::SpotlightHour => "SPOTLIGHT_HOUR",
            EventType::RaidHour => "RAID_HOUR",
            EventType::RaidBattles => "RAID_BATTLES",
            EventType::CommunityDay => "COMMUNITY_DAY",
            EventType::Season => "SEASON",
            EventType::Other(tag) => tag,
        }
    }

    pub fn is_categorized(&self) -> bool {
        !matches!(self, EventType::Other(_))
    }

    /// Normalize a listing label ("Pokémon Spotlight Hour") into a tag.
    pub fn from_label(label: &str) -> EventType {
        let tag = label
            .to_lowercase()
            .replace("pokémon", "")
            .trim()
            .replace(' ', "_")
            .to_uppercase();
        EventType::from(tag)
    }
}

impl From<String> for EventType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "SPOTLIGHT_HOUR" => EventType::SpotlightHour,
            "RAID_HOUR" => EventType::RaidHour,
            "RAID_BATTLES" => EventType::RaidBattles,
            "COMMUNITY_DAY" => EventType::CommunityDay,
            "SEASON" => EventType::Season,
            _ => EventType::Other(tag),
        }
    }
}

impl From<EventType> for String {
    fn from(t: EventType) -> Self {
        s!(t.as_str())
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/* ---------------- Content payload ---------------- */

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentValue {
    Flag(bool),
    List(Vec<String>),
    Text(String),
}

/// Category-specific payload, in extraction order.
pub type Content = IndexMap<String, ContentValue>;

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => join!(first.to_uppercase().to_string(), &chars.as_str().to_lowercase()),
        None => s!(),
    }
}

/* ---------------- Event ---------------- */

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "EventWire", into = "EventWire")]
pub struct Event {
    name: String,
    start_date: String,
    end_date: String,
    start: Moment,
    end: Moment,
    localtime: bool,
    event_type: EventType,
    content: Content,
    url: String,
    img_url: String,
}

/// Parse an event date: canonical first, ISO-8601 with offset as fallback.
pub fn parse_event_date(text: &str) -> Result<Moment> {
    Moment::parse_canonical(text)
        .or_else(|_| Moment::parse(text, ISO_DATE_FORMAT))
        .map_err(|_| Error::DateFormat { text: s!(text) })
}

fn normalize_date(text: &str) -> Result<(String, Moment)> {
    let moment = parse_event_date(text)?;
    Ok((moment.to_canonical_string(), moment))
}

impl Event {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        start_date: &str,
        end_date: &str,
        localtime: bool,
        event_type: EventType,
        content: Content,
        url: impl Into<String>,
        img_url: impl Into<String>,
    ) -> Result<Event> {
        let (start_date, start) = normalize_date(start_date)?;
        let (end_date, end) = normalize_date(end_date)?;
        Ok(Event {
            name: name.into(),
            start_date,
            end_date,
            start,
            end,
            localtime,
            event_type,
            content,
            url: url.into(),
            img_url: img_url.into(),
        })
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn start_date(&self) -> &str { &self.start_date }
    pub fn end_date(&self) -> &str { &self.end_date }
    pub fn start(&self) -> Moment { self.start }
    pub fn end(&self) -> Moment { self.end }
    pub fn start_timestamp(&self) -> f64 { self.start.timestamp() }
    pub fn end_timestamp(&self) -> f64 { self.end.timestamp() }
    pub fn localtime(&self) -> bool { self.localtime }
    pub fn event_type(&self) -> &EventType { &self.event_type }
    pub fn content(&self) -> &Content { &self.content }
    pub fn url(&self) -> &str { &self.url }
    pub fn img_url(&self) -> &str { &self.img_url }

    pub fn featured_pokemons(&self) -> &[String] {
        match self.content.get(FEATURED_KEY) {
            Some(ContentValue::List(v)) => v,
            _ => &[],
        }
    }

    /// A record is usable only with a name and both dates.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.start_date.is_empty() && !self.end_date.is_empty()
    }

    /// Multi-line description for calendar entries.
    pub fn render_summary(&self) -> String {
        let mut out = s!();
        for (key, value) in &self.content {
            if key == FEATURED_KEY {
                continue;
            }
            if key == SHINY_KEY {
                let yes = matches!(value, ContentValue::Flag(true));
                out.push_str(if yes { "Shiny: Yes\n" } else { "Shiny: No\n" });
                continue;
            }
            out.push_str(&capitalize(key));
            out.push_str(": ");
            match value {
                ContentValue::List(v) if v.is_empty() && key == BONUSES_KEY => out.push('?'),
                ContentValue::List(v) => out.push_str(&v.join(", ")),
                ContentValue::Text(t) => out.push_str(t),
                ContentValue::Flag(b) => out.push_str(if *b { "Yes" } else { "No" }),
            }
            out.push('\n');
        }
        out
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.start_date == other.start_date
            && self.end_date == other.end_date
    }
}
impl Eq for Event {}

impl Hash for Event {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.start_date.hash(state);
        self.end_date.hash(state);
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Start time first. End time and name only break ties, so that `Ord`
/// agrees with `Eq`.
impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.end.cmp(&other.end))
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} - {})", self.name, self.start_date, self.end_date)
    }
}

/* ---------------- Wire form ---------------- */

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventWire {
    name: String,
    start_date: String,
    end_date: String,
    localtime: bool,
    event_type: EventType,
    #[serde(default)]
    content: Content,
    url: String,
    img_url: String,
}

impl TryFrom<EventWire> for Event {
    type Error = Error;

    fn try_from(w: EventWire) -> Result<Event> {
        Event::new(w.name, &w.start_date, &w.end_date, w.localtime, w.event_type, w.content, w.url, w.img_url)
    }
}

impl From<Event> for EventWire {
    fn from(e: Event) -> Self {
        EventWire {
            name: e.name,
            start_date: e.start_date,
            end_date: e.end_date,
            localtime: e.localtime,
            event_type: e.event_type,
            content: e.content,
            url: e.url,
            img_url: e.img_url,
        }
    }
}
