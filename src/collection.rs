// src/collection.rs
//
// Ordered event container. Every query hands back a new collection; the
// source is never touched.

use serde::{Deserialize, Serialize};

use crate::event::{Event, EventType};
use crate::time::Moment;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCollection {
    items: Vec<Event>,
}

impl EventCollection {
    pub fn new(items: Vec<Event>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Event] { &self.items }
    pub fn len(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn first(&self) -> Option<&Event> { self.items.first() }
    pub fn last(&self) -> Option<&Event> { self.items.last() }
    pub fn iter(&self) -> std::slice::Iter<'_, Event> { self.items.iter() }
    pub fn contains(&self, ev: &Event) -> bool { self.items.contains(ev) }

    pub fn filter<F>(&self, mut pred: F) -> Self
    where
        F: FnMut(&Event) -> bool,
    {
        self.items.iter().filter(|ev| pred(ev)).cloned().collect()
    }

    /// Visit each event without changing the collection.
    pub fn for_each<F: FnMut(&Event)>(&self, f: F) {
        self.items.iter().for_each(f);
    }

    /* ---------------- Time queries ---------------- */

    /// Running now: `start <= now < end`, optionally bounded on the end date.
    pub fn current(&self, ending_before: Option<Moment>, ending_after: Option<Moment>) -> Self {
        self.current_at(Moment::now(), ending_before, ending_after)
    }

    pub fn current_at(&self, now: Moment, ending_before: Option<Moment>, ending_after: Option<Moment>) -> Self {
        self.filter(|ev| {
            ev.start() <= now
                && ev.end() > now
                && ending_before.is_none_or(|b| ev.end() <= b)
                && ending_after.is_none_or(|a| ev.end() >= a)
        })
    }

    /// Not started yet, optionally bounded on the start date (exclusive).
    pub fn upcoming(&self, before: Option<Moment>, after: Option<Moment>) -> Self {
        self.upcoming_at(Moment::now(), before, after)
    }

    pub fn upcoming_at(&self, now: Moment, before: Option<Moment>, after: Option<Moment>) -> Self {
        self.filter(|ev| {
            ev.start() > now
                && before.is_none_or(|b| ev.start() < b)
                && after.is_none_or(|a| ev.start() > a)
        })
    }

    /* ---------------- Category / content queries ---------------- */

    pub fn of_types(&self, types: &[EventType]) -> Self {
        self.filter(|ev| types.contains(ev.event_type()))
    }

    pub fn raid_battles(&self) -> Self { self.of_types(&[EventType::RaidBattles]) }
    pub fn raid_hours(&self) -> Self { self.of_types(&[EventType::RaidHour]) }
    pub fn spotlight_hours(&self) -> Self { self.of_types(&[EventType::SpotlightHour]) }

    /// Events featuring any (or with `strict`, all) of `names`.
    /// Only categorized events carry a featured list.
    pub fn featuring<S: AsRef<str>>(&self, names: &[S], strict: bool) -> Self {
        let wanted: Vec<String> = names.iter().map(|n| n.as_ref().to_uppercase()).collect();
        self.filter(|ev| {
            if !ev.event_type().is_categorized() {
                return false;
            }
            let featured = ev.featured_pokemons();
            let has = |n: &String| featured.contains(n);
            if strict { wanted.iter().all(has) } else { wanted.iter().any(has) }
        })
    }

    pub fn with_name_like(&self, needle: &str) -> Self {
        let needle = needle.to_lowercase();
        self.filter(|ev| ev.name().to_lowercase().contains(&needle))
    }

    /* ---------------- Set algebra ---------------- */

    /// Concatenation; duplicates are kept.
    pub fn union(&self, other: &EventCollection) -> Self {
        self.items.iter().chain(other.items.iter()).cloned().collect()
    }

    pub fn difference(&self, other: &EventCollection) -> Self {
        self.filter(|ev| !other.contains(ev))
    }

    pub fn intersect(&self, other: &EventCollection) -> Self {
        self.filter(|ev| other.contains(ev))
    }

    pub fn symmetric_difference(&self, other: &EventCollection) -> Self {
        self.difference(other).union(&other.difference(self))
    }

    /* ---------------- Ordering ---------------- */

    /// Stable sort on natural order (start time).
    pub fn sort(&self, reverse: bool) -> Self {
        let mut items = self.items.clone();
        if reverse {
            items.sort_by(|a, b| b.cmp(a));
        } else {
            items.sort();
        }
        Self { items }
    }

    /// Stable sort on a caller key.
    pub fn sort_by_key<K, F>(&self, mut key: F, reverse: bool) -> Self
    where
        K: PartialOrd,
        F: FnMut(&Event) -> K,
    {
        let mut items = self.items.clone();
        items.sort_by(|a, b| {
            let ord = key(a).partial_cmp(&key(b)).unwrap_or(std::cmp::Ordering::Equal);
            if reverse { ord.reverse() } else { ord }
        });
        Self { items }
    }
}

impl FromIterator<Event> for EventCollection {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

impl std::ops::Index<usize> for EventCollection {
    type Output = Event;
    fn index(&self, i: usize) -> &Event {
        &self.items[i]
    }
}

impl IntoIterator for EventCollection {
    type Item = Event;
    type IntoIter = std::vec::IntoIter<Event>;
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a EventCollection {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
