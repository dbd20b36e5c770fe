use std::fmt;

use serde::{Deserialize, Serialize};

/// A wall-clock reading split into calendar fields.
///
/// No zone is carried: the fields are read and written in the host's
/// calendar zone at conversion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeRecord {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    #[serde(default)]
    pub hour: i64,
    #[serde(default)]
    pub minute: i64,
    #[serde(default)]
    pub second: i64,
    #[serde(default)]
    pub millisecond: i64,
}

impl DateTimeRecord {
    pub fn new(year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond: 0,
        }
    }

    pub fn date(year: i64, month: i64, day: i64) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    pub fn with_millisecond(mut self, millisecond: i64) -> Self {
        self.millisecond = millisecond;
        self
    }
}

impl fmt::Display for DateTimeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:03}",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.millisecond
        )
    }
}
