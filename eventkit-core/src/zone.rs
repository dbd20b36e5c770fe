//! The calendar zone wall-clock fields are read and written in.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Zone used to decompose native instants into calendar fields and back.
///
/// Defaults to the host process's local zone. A named zone pins the
/// interpretation, which tests and headless hosts rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostTimeZone {
    #[default]
    Local,
    Named(Tz),
}

impl HostTimeZone {
    /// Parse an IANA zone name such as `Europe/Paris`.
    pub fn named(name: &str) -> Option<Self> {
        name.parse::<Tz>().ok().map(Self::Named)
    }

    /// Wall-clock reading of `instant` in this zone.
    pub fn wall_clock(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Self::Local => instant.with_timezone(&Local).naive_local(),
            Self::Named(tz) => instant.with_timezone(tz).naive_local(),
        }
    }

    /// Instant for a wall-clock reading. `None` when the reading falls in a
    /// gap; an ambiguous reading resolves to its earliest instant.
    pub fn instant(&self, wall_clock: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Self::Local => Local
                .from_local_datetime(&wall_clock)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            Self::Named(tz) => tz
                .from_local_datetime(&wall_clock)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}
