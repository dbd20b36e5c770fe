//! Model Translator between native store records and wire records.
//!
//! Context-free mappings (the enums) are `From` impls. Everything that
//! reads or writes calendar fields goes through [`Translator`], which knows
//! the zone those fields are expressed in.

mod enums;
mod from_native;
mod to_native;

pub use from_native::format_color;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc};

use crate::error::{BridgeError, BridgeResult};
use crate::record::DateTimeRecord;
use crate::zone::HostTimeZone;

/// Converts records in both directions. Pure: no store access, no state
/// beyond its configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Translator {
    zone: HostTimeZone,
    exposes_attendees: bool,
}

impl Translator {
    pub fn new(zone: HostTimeZone) -> Self {
        Self {
            zone,
            exposes_attendees: false,
        }
    }

    /// Whether attendee lists from the host are forwarded. Hosts that do not
    /// expose participants always yield `attendeeEmails: null`.
    pub fn with_attendees(mut self, exposes_attendees: bool) -> Self {
        self.exposes_attendees = exposes_attendees;
        self
    }

    pub fn zone(&self) -> HostTimeZone {
        self.zone
    }

    /// Split an instant into calendar fields. Sub-millisecond precision is
    /// truncated.
    pub fn date_time(&self, instant: DateTime<Utc>) -> DateTimeRecord {
        let wall = self.zone.wall_clock(instant);

        DateTimeRecord {
            year: i64::from(wall.year()),
            month: i64::from(wall.month()),
            day: i64::from(wall.day()),
            hour: i64::from(wall.hour()),
            minute: i64::from(wall.minute()),
            second: i64::from(wall.second()),
            millisecond: i64::from(wall.nanosecond() / 1_000_000),
        }
    }

    /// Rebuild the instant a set of calendar fields names.
    ///
    /// Fields out of range, or a wall-clock time skipped by a zone
    /// transition, are rejected rather than normalized.
    pub fn instant(&self, record: &DateTimeRecord) -> BridgeResult<DateTime<Utc>> {
        let invalid = || BridgeError::InvalidDateTime(record.to_string());
        let field = |value: i64| u32::try_from(value).map_err(|_| invalid());

        // chrono reads 1000..2000 ms at second 59 as a leap second.
        if !(0..1000).contains(&record.millisecond) {
            return Err(invalid());
        }

        let year = i32::try_from(record.year).map_err(|_| invalid())?;
        let date = NaiveDate::from_ymd_opt(year, field(record.month)?, field(record.day)?)
            .ok_or_else(invalid)?;
        let time = NaiveTime::from_hms_milli_opt(
            field(record.hour)?,
            field(record.minute)?,
            field(record.second)?,
            field(record.millisecond)?,
        )
        .ok_or_else(invalid)?;

        self.zone.instant(date.and_time(time)).ok_or_else(invalid)
    }
}
