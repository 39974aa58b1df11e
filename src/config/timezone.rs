//! Site timezone handling.
//!
//! The site stores every server timestamp in UTC, but two things are defined
//! in wall-clock terms: the countdown target date and the "today" window used
//! by the analytics counter. Both resolve through [`SiteTimezone`], which is
//! read from settings instead of silently inheriting the host's locale.

use crate::errors::{Error, Result};
use chrono::{
    DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
    Utc,
};
use serde::Deserialize;
use std::{fmt, str::FromStr};

/// Timezone used to interpret wall-clock values
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum SiteTimezone {
    /// The server process's local timezone
    #[default]
    Local,
    /// A fixed UTC offset (`utc` parses to a zero offset)
    Fixed(FixedOffset),
}

/// Half-open `[start, end)` interval of UTC timestamps
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UtcRange {
    /// Inclusive lower bound
    pub start: NaiveDateTime,
    /// Exclusive upper bound
    pub end: NaiveDateTime,
}

impl SiteTimezone {
    /// UTC bounds of the calendar day containing `now` in this timezone.
    #[must_use]
    pub fn day_bounds(&self, now: DateTime<Utc>) -> UtcRange {
        match self {
            Self::Local => day_bounds_in(&Local, now),
            Self::Fixed(offset) => day_bounds_in(offset, now),
        }
    }

    /// Interprets a wall-clock timestamp in this timezone.
    #[must_use]
    pub fn to_utc(&self, wall_clock: NaiveDateTime) -> DateTime<Utc> {
        match self {
            Self::Local => resolve_in(&Local, wall_clock),
            Self::Fixed(offset) => resolve_in(offset, wall_clock),
        }
    }

    /// Wall-clock reading of an instant in this timezone.
    #[must_use]
    pub fn wall_clock(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Self::Local => instant.with_timezone(&Local).naive_local(),
            Self::Fixed(offset) => instant.with_timezone(offset).naive_local(),
        }
    }
}

fn day_bounds_in<Tz: TimeZone>(tz: &Tz, now: DateTime<Utc>) -> UtcRange {
    let today = now.with_timezone(tz).date_naive();
    let start = midnight_in(tz, today);
    let end = today
        .succ_opt()
        .map_or(start + Duration::days(1), |tomorrow| midnight_in(tz, tomorrow));
    UtcRange { start, end }
}

fn midnight_in<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> NaiveDateTime {
    resolve_in(tz, NaiveDateTime::new(date, NaiveTime::default())).naive_utc()
}

// Wall-clock times skipped by a DST jump resolve to the first valid instant
// an hour later; ambiguous ones take the earlier of the two.
fn resolve_in<Tz: TimeZone>(tz: &Tz, wall_clock: NaiveDateTime) -> DateTime<Utc> {
    tz.from_local_datetime(&wall_clock)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(wall_clock + Duration::hours(1)))
                .earliest()
        })
        .map_or_else(
            || Utc.from_utc_datetime(&wall_clock),
            |resolved| resolved.with_timezone(&Utc),
        )
}

impl FromStr for SiteTimezone {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let value = value.trim();
        match value.to_ascii_lowercase().as_str() {
            "local" => return Ok(Self::Local),
            "utc" | "z" => return Ok(Self::Fixed(Utc.fix())),
            _ => {}
        }

        parse_offset(value).map(Self::Fixed).ok_or_else(|| Error::Config {
            message: format!(
                "Invalid timezone '{value}' (expected 'local', 'utc' or an offset like '+06:00')"
            ),
        })
    }
}

/// Parses `+HH:MM`, `-HH:MM`, `+HHMM` or `+HH`.
fn parse_offset(value: &str) -> Option<FixedOffset> {
    let (sign, rest) = match value.as_bytes().first()? {
        b'+' => (1, &value[1..]),
        b'-' => (-1, &value[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 2 && digits.len() != 4 {
        return None;
    }
    let hours: i32 = digits.get(..2)?.parse().ok()?;
    let minutes: i32 = digits.get(2..).filter(|m| !m.is_empty()).map_or(Ok(0), str::parse).ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

impl TryFrom<String> for SiteTimezone {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for SiteTimezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}
