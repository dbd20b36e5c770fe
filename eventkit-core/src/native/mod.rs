//! The host store's own representation of calendars, events and reminders.
//!
//! These mirror what the operating system's calendar service hands out:
//! instants are absolute (`DateTime<Utc>`), colors are raw component
//! arrays, enums carry raw values. The translator in `convert` turns them
//! into wire records and back.

mod enums;

pub use enums::*;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::store::EntityType;
use crate::zone::HostTimeZone;

/// A calendar color as the host reports it: component values in `[0, 1]`,
/// red/green/blue first, optionally followed by alpha.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeColor {
    pub components: Vec<f64>,
}

impl NativeColor {
    pub fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self {
            components: vec![red, green, blue, 1.0],
        }
    }
}

/// The account a calendar belongs to (iCloud, Exchange, On My Mac, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeSource {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeCalendar {
    pub calendar_identifier: String,
    pub title: String,
    pub source: NativeSource,
    #[serde(default)]
    pub color: Option<NativeColor>,
    #[serde(default = "default_true")]
    pub allows_content_modifications: bool,
    #[serde(default)]
    pub is_subscribed: bool,
    #[serde(default)]
    pub external_identifier: Option<String>,
    pub allowed_entity_types: Vec<EntityType>,
}

fn default_true() -> bool {
    true
}

impl NativeCalendar {
    pub fn allows(&self, entity: EntityType) -> bool {
        self.allowed_entity_types.contains(&entity)
    }
}

/// Which calendar an item is bound to.
///
/// `Unattached` stands for a calendar object that belongs to no store
/// calendar; the host rejects saving an item bound that way.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarBinding {
    Attached(NativeCalendar),
    #[default]
    Unattached,
}

impl CalendarBinding {
    pub fn calendar(&self) -> Option<&NativeCalendar> {
        match self {
            Self::Attached(calendar) => Some(calendar),
            Self::Unattached => None,
        }
    }

    pub fn identifier(&self) -> Option<&str> {
        self.calendar().map(|c| c.calendar_identifier.as_str())
    }
}

impl From<Option<NativeCalendar>> for CalendarBinding {
    fn from(calendar: Option<NativeCalendar>) -> Self {
        calendar.map_or(Self::Unattached, Self::Attached)
    }
}

/// An event participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeParticipant {
    #[serde(default)]
    pub name: Option<String>,
    /// Absent for participants the host only knows by a non-mailto URL.
    #[serde(default)]
    pub email_address: Option<String>,
}

/// Weekday in host numbering (1 = Sunday ... 7 = Saturday), optionally
/// pinned to a week of the period (`week_number` 0 = every week).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeDayOfWeek {
    pub day_of_the_week: i64,
    #[serde(default)]
    pub week_number: i64,
}

/// How a recurrence ends. A rule carries at most one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceEnd {
    Date(DateTime<Utc>),
    OccurrenceCount(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeRecurrenceRule {
    pub frequency: NativeFrequency,
    pub interval: i64,
    /// `None` recurs indefinitely.
    #[serde(default)]
    pub recurrence_end: Option<RecurrenceEnd>,
    #[serde(default)]
    pub days_of_the_week: Option<Vec<NativeDayOfWeek>>,
    #[serde(default)]
    pub days_of_the_month: Option<Vec<i64>>,
    #[serde(default)]
    pub months_of_the_year: Option<Vec<i64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeEvent {
    /// Assigned by the host on first save.
    #[serde(default)]
    pub event_identifier: Option<String>,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub url: Option<Url>,
    #[serde(default)]
    pub availability: NativeAvailability,
    #[serde(default)]
    pub status: NativeEventStatus,
    #[serde(default)]
    pub calendar: CalendarBinding,
    /// `None` on hosts that do not expose participants.
    #[serde(default)]
    pub attendees: Option<Vec<NativeParticipant>>,
    #[serde(default)]
    pub recurrence_rules: Option<Vec<NativeRecurrenceRule>>,
}

impl NativeEvent {
    /// A fresh, unsaved event with no calendar.
    pub fn new(start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Self {
        Self {
            event_identifier: None,
            title: String::new(),
            notes: None,
            start_date,
            end_date,
            is_all_day: false,
            location: None,
            url: None,
            availability: NativeAvailability::default(),
            status: NativeEventStatus::default(),
            calendar: CalendarBinding::Unattached,
            attendees: None,
            recurrence_rules: None,
        }
    }
}

/// Floating calendar fields of a reminder's due date. The host keeps no
/// seconds here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DueDateComponents {
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub month: Option<i64>,
    #[serde(default)]
    pub day: Option<i64>,
    #[serde(default)]
    pub hour: Option<i64>,
    #[serde(default)]
    pub minute: Option<i64>,
}

impl DueDateComponents {
    /// The instant these fields name in `zone`, with seconds at zero.
    /// `None` when year, month or day is missing or the fields do not form
    /// a valid wall-clock time.
    pub fn resolve(&self, zone: HostTimeZone) -> Option<DateTime<Utc>> {
        let year = i32::try_from(self.year?).ok()?;
        let month = u32::try_from(self.month?).ok()?;
        let day = u32::try_from(self.day?).ok()?;
        let hour = u32::try_from(self.hour.unwrap_or(0)).ok()?;
        let minute = u32::try_from(self.minute.unwrap_or(0)).ok()?;

        let wall = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)?;
        zone.instant(wall)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NativeReminder {
    /// Assigned by the host on first save.
    #[serde(default)]
    pub calendar_item_identifier: Option<String>,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub due_date_components: Option<DueDateComponents>,
    #[serde(default)]
    pub completion_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub calendar: CalendarBinding,
    /// 0 = none; 1 (high) ... 9 (low) on the host scale.
    #[serde(default)]
    pub priority: i64,
}
