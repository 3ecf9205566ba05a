// src/ics.rs
//! iCalendar (RFC 5545) export: one VEVENT per event, each with the same
//! set of DISPLAY reminders before the start.

use std::{io::Write, path::Path};

use chrono::{Local, Utc};

use crate::{
    collection::EventCollection,
    config::consts::REMINDER_MINUTES,
    error::Result,
    event::Event,
    file,
    time::Moment,
};

const PRODID: &str = concat!("-//pogo_cal//", env!("CARGO_PKG_VERSION"), "//EN");
const MAX_LINE_OCTETS: usize = 75;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlarmAction {
    Display,
}

/// Reminder relative to the event start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Alarm {
    pub action: AlarmAction,
    pub minutes_before: i64,
}

impl Alarm {
    pub fn before_start(minutes: i64) -> Self {
        Self { action: AlarmAction::Display, minutes_before: minutes }
    }

    fn trigger(&self) -> String {
        let m = self.minutes_before;
        if m % 60 == 0 { format!("-PT{}H", m / 60) } else { format!("-PT{m}M") }
    }
}

pub fn default_alarms() -> Vec<Alarm> {
    REMINDER_MINUTES.iter().copied().map(Alarm::before_start).collect()
}

/// Write the whole calendar. `now` stamps every entry.
pub fn write_calendar<W: Write>(w: &mut W, events: &EventCollection, now: Moment) -> Result<()> {
    let alarms = default_alarms();
    let stamp = utc_stamp(now);

    line(w, "BEGIN:VCALENDAR")?;
    line(w, "VERSION:2.0")?;
    line(w, &join!("PRODID:", PRODID))?;
    line(w, "CALSCALE:GREGORIAN")?;
    for ev in events {
        write_event(w, ev, &stamp, &alarms)?;
    }
    line(w, "END:VCALENDAR")?;
    Ok(())
}

/// Write the calendar to `path`, creating parent directories.
pub fn export(path: &Path, events: &EventCollection, now: Moment) -> Result<()> {
    let mut w = file::create_buffered(path)?;
    write_calendar(&mut w, events, now)?;
    w.flush()?;
    tracing::info!(path = %path.display(), events = events.len(), "calendar written");
    Ok(())
}

fn write_event<W: Write>(w: &mut W, ev: &Event, stamp: &str, alarms: &[Alarm]) -> Result<()> {
    line(w, "BEGIN:VEVENT")?;
    line(w, &join!("UID:", &uid(ev)))?;
    line(w, &join!("DTSTAMP:", stamp))?;
    line(w, &join!("SUMMARY:", &escape_text(ev.name())))?;
    line(w, &join!("DTSTART:", &event_time(ev.start(), ev.localtime())))?;
    line(w, &join!("DTEND:", &event_time(ev.end(), ev.localtime())))?;

    let summary = ev.render_summary();
    if !summary.is_empty() {
        line(w, &join!("DESCRIPTION:", &escape_text(summary.trim_end_matches('\n'))))?;
    }
    if !ev.url().is_empty() {
        line(w, &join!("URL:", ev.url()))?;
    }
    line(w, &join!("CATEGORIES:", &escape_text(ev.event_type().as_str())))?;

    for alarm in alarms {
        line(w, "BEGIN:VALARM")?;
        match alarm.action {
            AlarmAction::Display => line(w, "ACTION:DISPLAY")?,
        }
        line(w, &join!("DESCRIPTION:", &escape_text(ev.name())))?;
        line(w, &join!("TRIGGER:", &alarm.trigger()))?;
        line(w, "END:VALARM")?;
    }
    line(w, "END:VEVENT")?;
    Ok(())
}

/// Built from the UTC start/end and a slug of the name, so re-exports of the
/// same event update it in place.
fn uid(ev: &Event) -> String {
    let mut slug = String::with_capacity(ev.name().len());
    for ch in ev.name().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    format!("{}-{}-{slug}@pogo_cal", utc_stamp(ev.start()), utc_stamp(ev.end()))
}

fn utc_stamp(m: Moment) -> String {
    m.date_time().with_timezone(&Utc).format("%Y%m%dT%H%M%SZ").to_string()
}

/// Local-time events float (same wall clock everywhere); others are UTC.
fn event_time(m: Moment, localtime: bool) -> String {
    if localtime {
        m.date_time().with_timezone(&Local).format("%Y%m%dT%H%M%S").to_string()
    } else {
        utc_stamp(m)
    }
}

pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}

/// Split into CRLF-terminated physical lines of at most 75 octets;
/// continuation lines start with one space.
pub fn fold(content: &str) -> String {
    let mut out = String::with_capacity(content.len() + 8);
    let mut used = 0;
    for ch in content.chars() {
        let len = ch.len_utf8();
        if used + len > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            used = 1;
        }
        out.push(ch);
        used += len;
    }
    out.push_str("\r\n");
    out
}

fn line<W: Write>(w: &mut W, content: &str) -> Result<()> {
    w.write_all(fold(content).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{BONUSES_KEY, Content, ContentValue, EventType, FEATURED_KEY};

    fn render(events: &EventCollection) -> String {
        let mut buf = Vec::new();
        let now = Moment::parse("2024-03-01T08:00:00+0000", "%Y-%m-%dT%H:%M:%S%z").unwrap();
        write_calendar(&mut buf, events, now).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn cd() -> Event {
        let mut c = Content::new();
        c.insert(s!(FEATURED_KEY), ContentValue::List(vec![s!("BULBASAUR")]));
        c.insert(s!(BONUSES_KEY), ContentValue::List(vec![s!("2x Candy"), s!("3x Stardust")]));
        Event::new(
            "Bulbasaur Community Day",
            "2024-03-09 14:00:00",
            "2024-03-09 17:00:00",
            true,
            EventType::CommunityDay,
            c,
            "https://leekduck.com/events/bulbasaur-community-day/",
            "",
        )
        .unwrap()
    }

    #[test]
    fn local_event_floats_and_carries_three_alarms() {
        let out = render(&EventCollection::new(vec![cd()]));
        assert!(out.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
        assert!(out.ends_with("END:VCALENDAR\r\n"));
        assert!(out.contains("DTSTAMP:20240301T080000Z\r\n"));
        assert!(out.contains("DTSTART:20240309T140000\r\n"));
        assert!(out.contains("DTEND:20240309T170000\r\n"));
        assert!(out.contains("DESCRIPTION:Bonuses: 2x Candy\\, 3x Stardust\r\n"));
        assert_eq!(out.matches("BEGIN:VALARM").count(), 3);
        for trigger in ["TRIGGER:-PT30M", "TRIGGER:-PT1H", "TRIGGER:-PT3H"] {
            assert!(out.contains(trigger), "missing {trigger}");
        }
    }

    #[test]
    fn offset_event_is_written_in_utc() {
        let ev = Event::new(
            "Global Raid",
            "2024-03-09T14:00:00+0200",
            "2024-03-09T15:00:00+0200",
            false,
            EventType::RaidHour,
            Content::new(),
            "",
            "",
        )
        .unwrap();
        let out = render(&EventCollection::new(vec![ev]));
        assert!(out.contains("DTSTART:20240309T120000Z\r\n"));
        assert!(out.contains("DTEND:20240309T130000Z\r\n"));
        assert!(!out.contains("URL:"));
    }

    #[test]
    fn uid_is_stable() {
        let a = render(&EventCollection::new(vec![cd()]));
        let b = render(&EventCollection::new(vec![cd()]));
        let uid = |s: &str| s.lines().find(|l| l.starts_with("UID:")).map(str::to_owned);
        assert_eq!(uid(&a), uid(&b));

        let start = utc_stamp(cd().start());
        let expected = format!("UID:{start}-{}-bulbasaur-community-day@pogo_cal", utc_stamp(cd().end()));
        assert_eq!(uid(&a), Some(expected));
    }

    #[test]
    fn escapes_special_characters() {
        assert_eq!(escape_text("a,b;c\\d\ne"), "a\\,b\\;c\\\\d\\ne");
    }

    #[test]
    fn folds_long_lines_on_char_boundaries() {
        let long = join!("SUMMARY:", &"é".repeat(60));
        let folded = fold(&long);
        for physical in folded.split("\r\n").filter(|l| !l.is_empty()) {
            assert!(physical.len() <= MAX_LINE_OCTETS, "{} octets", physical.len());
        }
        let unfolded = folded.replace("\r\n ", "");
        assert_eq!(unfolded.trim_end_matches("\r\n"), long);
    }

    #[test]
    fn export_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("cal.ics");
        export(&path, &EventCollection::new(vec![cd()]), Moment::now()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("BEGIN:VEVENT").count(), 1);
    }
}
