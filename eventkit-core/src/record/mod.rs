//! Wire records.
//!
//! Flat, host-agnostic records exchanged with the external caller. Field
//! names are camelCase on the wire. All of them are plain values built
//! fresh per request.

mod date_time;
mod status;

pub use date_time::DateTimeRecord;
pub use status::*;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarRecord {
    pub identifier: String,
    pub title: String,
    /// Title of the account the calendar lives in.
    pub source: String,
    /// `#RRGGBB`
    #[serde(default)]
    pub color: Option<String>,
    pub is_editable: bool,
    pub is_subscribed: bool,
    #[serde(default)]
    pub external_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(default)]
    pub identifier: Option<String>,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub start_date: DateTimeRecord,
    pub end_date: DateTimeRecord,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub availability: EventAvailability,
    /// Read-only; ignored when saving.
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub calendar_id: Option<String>,
    #[serde(default)]
    pub attendee_emails: Option<Vec<String>>,
    /// Only the first rule of the host event.
    #[serde(default)]
    pub recurrence_rule: Option<RecurrenceRuleRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRecord {
    #[serde(default)]
    pub identifier: Option<String>,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTimeRecord>,
    #[serde(default)]
    pub completion_date: Option<DateTimeRecord>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub calendar_id: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
}

/// Read-only view of an event's recurrence. At most one of `end_date` and
/// `occurrence_count` is set; neither means the event recurs indefinitely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRuleRecord {
    pub frequency: RecurrenceFrequency,
    pub interval: i64,
    #[serde(default)]
    pub end_date: Option<DateTimeRecord>,
    #[serde(default)]
    pub occurrence_count: Option<i64>,
    #[serde(default)]
    pub days_of_the_week: Option<Vec<i64>>,
    #[serde(default)]
    pub days_of_the_month: Option<Vec<i64>>,
    #[serde(default)]
    pub months_of_the_year: Option<Vec<i64>>,
}
