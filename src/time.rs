// src/time.rs
//! `Moment`: one absolute instant with the parsing/formatting rules the cache
//! and the listing page need.
//!
//! Comparisons and arithmetic always go through the seconds-since-epoch value,
//! so a `Moment` can be compared against another `Moment`, a raw `f64`
//! timestamp or a `TimeDelta` (its total seconds).

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use chrono::{
    DateTime, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, TimeDelta, TimeZone,
};

use crate::config::consts::CANONICAL_DATE_FORMAT;
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug)]
pub struct Moment {
    inner: DateTime<FixedOffset>,
}

impl Moment {
    /// Parse `text` with a strftime-style `format`.
    ///
    /// Formats carrying an offset (`%z`, `%:z`, `%#z`) keep it; `%#z` also
    /// takes a bare `Z`. Anything else is read as
    /// local wall-clock time; date-only formats resolve to local midnight.
    pub fn parse(text: &str, format: &str) -> Result<Moment> {
        let mismatch = || Error::FormatMismatch { text: s!(text), format: s!(format) };

        if ["%z", "%:z", "%#z"].iter().any(|spec| format.contains(*spec)) {
            let inner = DateTime::parse_from_str(text, format).map_err(|_| mismatch())?;
            return Ok(Moment { inner });
        }

        let naive = match NaiveDateTime::parse_from_str(text, format) {
            Ok(n) => n,
            Err(_) => NaiveDate::parse_from_str(text, format)
                .map_err(|_| mismatch())?
                .and_hms_opt(0, 0, 0)
                .ok_or_else(mismatch)?,
        };
        Moment::from_local_naive(naive).ok_or_else(mismatch)
    }

    /// Shorthand for the canonical storage format.
    pub fn parse_canonical(text: &str) -> Result<Moment> {
        Moment::parse(text, CANONICAL_DATE_FORMAT)
    }

    pub fn from_timestamp(seconds: f64, offset: Option<FixedOffset>) -> Result<Moment> {
        if !seconds.is_finite() {
            return Err(Error::TimestampOutOfRange(seconds));
        }
        let secs = seconds.floor();
        let nanos = ((seconds - secs) * 1e9).round().min(999_999_999.0) as u32;
        let utc = DateTime::from_timestamp(secs as i64, nanos)
            .ok_or(Error::TimestampOutOfRange(seconds))?;
        let inner = match offset {
            Some(off) => utc.with_timezone(&off),
            None => utc.with_timezone(&Local).fixed_offset(),
        };
        Ok(Moment { inner })
    }

    pub fn now() -> Moment {
        Moment { inner: Local::now().fixed_offset() }
    }

    fn from_local_naive(naive: NaiveDateTime) -> Option<Moment> {
        // DST folds take the earlier reading; gaps have no local reading.
        match Local.from_local_datetime(&naive) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                Some(Moment { inner: dt.fixed_offset() })
            }
            LocalResult::None => None,
        }
    }

    pub fn timestamp(&self) -> f64 {
        self.inner.timestamp() as f64 + f64::from(self.inner.timestamp_subsec_nanos()) / 1e9
    }

    pub fn offset(&self) -> FixedOffset {
        *self.inner.offset()
    }

    pub fn date_time(&self) -> DateTime<FixedOffset> {
        self.inner
    }

    /// Local wall-clock rendering used for storage. Re-parsing it yields the
    /// same instant (to the second).
    pub fn to_canonical_string(&self) -> String {
        self.inner.with_timezone(&Local).format(CANONICAL_DATE_FORMAT).to_string()
    }

    /// Render in this value's own offset.
    pub fn format(&self, fmt: &str) -> String {
        self.inner.format(fmt).to_string()
    }

    fn shifted(&self, seconds: f64) -> Moment {
        let delta = TimeDelta::nanoseconds((seconds * 1e9).round() as i64);
        Moment { inner: self.inner + delta }
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

/* ---------------- Comparison ---------------- */

fn delta_secs(d: &TimeDelta) -> f64 {
    d.num_milliseconds() as f64 / 1000.0
}

impl PartialEq for Moment {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}
impl Eq for Moment {}

impl PartialOrd for Moment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Moment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}

impl PartialEq<f64> for Moment {
    fn eq(&self, other: &f64) -> bool {
        self.timestamp() == *other
    }
}
impl PartialOrd<f64> for Moment {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.timestamp().partial_cmp(other)
    }
}

impl PartialEq<TimeDelta> for Moment {
    fn eq(&self, other: &TimeDelta) -> bool {
        self.timestamp() == delta_secs(other)
    }
}
impl PartialOrd<TimeDelta> for Moment {
    fn partial_cmp(&self, other: &TimeDelta) -> Option<Ordering> {
        self.timestamp().partial_cmp(&delta_secs(other))
    }
}

/* ---------------- Arithmetic ---------------- */

impl Add<TimeDelta> for Moment {
    type Output = Moment;
    fn add(self, rhs: TimeDelta) -> Moment {
        Moment { inner: self.inner + rhs }
    }
}
impl Sub<TimeDelta> for Moment {
    type Output = Moment;
    fn sub(self, rhs: TimeDelta) -> Moment {
        Moment { inner: self.inner - rhs }
    }
}
impl Add<f64> for Moment {
    type Output = Moment;
    fn add(self, rhs: f64) -> Moment {
        self.shifted(rhs)
    }
}
impl Sub<f64> for Moment {
    type Output = Moment;
    fn sub(self, rhs: f64) -> Moment {
        self.shifted(-rhs)
    }
}
impl Sub<Moment> for Moment {
    type Output = TimeDelta;
    fn sub(self, rhs: Moment) -> TimeDelta {
        self.inner.signed_duration_since(rhs.inner)
    }
}

impl AddAssign<TimeDelta> for Moment {
    fn add_assign(&mut self, rhs: TimeDelta) {
        self.inner = self.inner + rhs;
    }
}
impl SubAssign<TimeDelta> for Moment {
    fn sub_assign(&mut self, rhs: TimeDelta) {
        self.inner = self.inner - rhs;
    }
}
impl AddAssign<f64> for Moment {
    fn add_assign(&mut self, rhs: f64) {
        *self = self.shifted(rhs);
    }
}
impl SubAssign<f64> for Moment {
    fn sub_assign(&mut self, rhs: f64) {
        *self = self.shifted(-rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::consts::ISO_DATE_FORMAT;

    #[test]
    fn canonical_round_trip_is_stable() {
        for s in ["2024-03-09 14:00:00", "2024-12-31 23:59:59"] {
            let first = Moment::parse_canonical(s).unwrap();
            let again = Moment::parse_canonical(&first.to_canonical_string()).unwrap();
            assert_eq!(first, again);
            assert_eq!(first.to_canonical_string(), s);
        }
    }

    #[test]
    fn iso_round_trip_keeps_instant() {
        let m = Moment::parse("2024-03-09T14:00:00+0200", ISO_DATE_FORMAT).unwrap();
        assert_eq!(m.timestamp(), 1_709_985_600.0);
        let back = Moment::parse_canonical(&m.to_canonical_string()).unwrap();
        assert_eq!(back.timestamp(), m.timestamp());
    }

    #[test]
    fn iso_accepts_zulu_and_colon_offsets() {
        let zulu = Moment::parse("2024-03-09T12:00:00Z", ISO_DATE_FORMAT).unwrap();
        let colon = Moment::parse("2024-03-09T14:00:00+02:00", ISO_DATE_FORMAT).unwrap();
        assert_eq!(zulu.timestamp(), 1_709_985_600.0);
        assert_eq!(zulu, colon);
    }

    #[test]
    fn mismatch_reports_text_and_format() {
        let err = Moment::parse("yesterday", CANONICAL_DATE_FORMAT).unwrap_err();
        assert!(matches!(err, Error::FormatMismatch { ref text, .. } if text == "yesterday"));
    }

    #[test]
    fn date_only_format_is_midnight() {
        let m = Moment::parse("2024-05-01", "%Y-%m-%d").unwrap();
        assert_eq!(m.to_canonical_string(), "2024-05-01 00:00:00");
    }

    #[test]
    fn compares_against_numbers_and_deltas() {
        let m = Moment::from_timestamp(100.0, Some(FixedOffset::east_opt(0).unwrap())).unwrap();
        assert!(m > 99.5);
        assert!(m == 100.0);
        assert!(m < TimeDelta::seconds(101));
        assert!(m == TimeDelta::seconds(100));
    }

    #[test]
    fn arithmetic_and_in_place_updates() {
        let start = Moment::from_timestamp(1_000.0, None).unwrap();
        let later = start + TimeDelta::minutes(1);
        assert_eq!(later.timestamp(), 1_060.0);
        assert_eq!((later - 60.0).timestamp(), 1_000.0);
        assert_eq!(later - start, TimeDelta::seconds(60));

        let mut m = start;
        m += 30.5;
        assert_eq!(m.timestamp(), 1_030.5);
        m -= TimeDelta::seconds(30);
        assert_eq!(m.timestamp(), 1_000.5);
        assert_eq!(start.timestamp(), 1_000.0);
    }

    #[test]
    fn rejects_non_finite_timestamps() {
        assert!(matches!(
            Moment::from_timestamp(f64::NAN, None),
            Err(Error::TimestampOutOfRange(_))
        ));
    }
}
