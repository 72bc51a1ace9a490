//! Wall-clock and calendar-date arithmetic.
//!
//! Times travel as zero-padded 24-hour `HH:mm` strings and dates as
//! `YYYY-MM-DD` keys. Both are validated here, at the boundary, so the
//! availability logic only ever sees well-formed values.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Length of one bookable slot in minutes.
pub const SLOT_MINUTES: u32 = 60;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// A validated wall-clock time, stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u32);

impl ClockTime {
    /// Build a time from a minute offset.
    ///
    /// Offsets past the end of the day are kept as-is; they display with an
    /// hour of 24 or more, matching [`minutes_to_time`].
    pub fn from_minutes(minutes: u32) -> Self {
        ClockTime(minutes)
    }

    pub fn minutes(self) -> u32 {
        self.0
    }
}

impl FromStr for ClockTime {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        time_to_minutes(s).map(ClockTime)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = SlotError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&minutes_to_time(self.0))
    }
}

/// Parse an `HH:mm` string into minutes since midnight.
///
/// Exactly two digits, a colon, and two digits are accepted. Hours must be
/// in `0..=23` and minutes in `0..=59`.
///
/// # Errors
/// Returns `SlotError::MalformedTime` for anything else, including `"9:00"`,
/// `"24:00"` and `"09:60"`.
pub fn time_to_minutes(time: &str) -> Result<u32> {
    let malformed = || SlotError::MalformedTime(time.to_string());

    let bytes = time.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(malformed());
    }
    let digit = |b: u8| -> Result<u32> {
        if b.is_ascii_digit() {
            Ok(u32::from(b - b'0'))
        } else {
            Err(malformed())
        }
    };

    let hours = digit(bytes[0])? * 10 + digit(bytes[1])?;
    let minutes = digit(bytes[3])? * 10 + digit(bytes[4])?;
    if hours > 23 || minutes > 59 {
        return Err(malformed());
    }

    let total = hours * 60 + minutes;
    debug_assert!(total < MINUTES_PER_DAY);
    Ok(total)
}

/// Format a minute offset as zero-padded `HH:mm`.
///
/// No wraparound: `1440` formats as `"24:00"`.
pub fn minutes_to_time(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parse a `YYYY-MM-DD` date key.
///
/// # Errors
/// Returns `SlotError::UnknownDateFormat` if the string is not exactly ten
/// characters of the form `YYYY-MM-DD`, or does not name a real calendar day.
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    let unknown = || SlotError::UnknownDateFormat(date.to_string());

    let bytes = date.as_bytes();
    let well_shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_shaped {
        return Err(unknown());
    }

    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| unknown())
}

/// Format a date as its `YYYY-MM-DD` key.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
