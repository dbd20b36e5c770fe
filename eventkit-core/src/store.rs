//! The host calendar store, as seen from the bridge.
//!
//! `HostStore` is the boundary to the operating system's calendar service.
//! Every method maps to one primitive of that service; the bridge never
//! assumes more than per-call atomicity from it.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::adapter::Capabilities;
use crate::error::StoreResult;
use crate::native::{NativeAuthorizationStatus, NativeCalendar, NativeEvent, NativeReminder};

/// The two data domains the host store grants access to separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Event,
    Reminder,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Event => write!(f, "event"),
            Self::Reminder => write!(f, "reminder"),
        }
    }
}

/// Events whose occurrence intersects `[start, end)`, optionally limited to
/// a set of calendars.
#[derive(Debug, Clone, PartialEq)]
pub struct EventPredicate {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Calendar identifiers; `None` searches every event calendar.
    pub calendars: Option<Vec<String>>,
}

/// Reminder selection, built by the adapter and evaluated by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum ReminderPredicate {
    /// Every reminder in the given calendars (`None` = all reminder calendars).
    All { calendars: Option<Vec<String>> },
    /// Incomplete reminders whose due date lies in `[start, end)`.
    Incomplete {
        due_start: Option<DateTime<Utc>>,
        due_end: Option<DateTime<Utc>>,
        calendars: Option<Vec<String>>,
    },
    /// Completed reminders whose completion date lies in `[start, end)`.
    Completed {
        completion_start: Option<DateTime<Utc>>,
        completion_end: Option<DateTime<Utc>>,
        calendars: Option<Vec<String>>,
    },
}

#[async_trait]
pub trait HostStore: Send + Sync {
    /// Feature levels this host exposes.
    fn capabilities(&self) -> Capabilities;

    /// Legacy permission prompt. Resolves once the user has answered.
    async fn request_access(&self, entity: EntityType) -> StoreResult<bool>;

    /// Full-access permission prompt, on hosts that distinguish it.
    async fn request_full_access(&self, entity: EntityType) -> StoreResult<bool>;

    fn authorization_status(&self, entity: EntityType) -> NativeAuthorizationStatus;

    fn calendars(&self, entity: EntityType) -> Vec<NativeCalendar>;

    fn calendar(&self, identifier: &str) -> Option<NativeCalendar>;

    fn default_calendar_for_new_reminders(&self) -> Option<NativeCalendar>;

    fn events(&self, predicate: &EventPredicate) -> Vec<NativeEvent>;

    fn event(&self, identifier: &str) -> Option<NativeEvent>;

    /// Save and commit an event. Returns the identifier the host assigned.
    fn save_event(&self, event: NativeEvent) -> StoreResult<String>;

    fn remove_event(&self, event: &NativeEvent) -> StoreResult<()>;

    /// Fetch reminders matching `predicate`. Completes through the host's
    /// own notification; `None` when the host reported no result set.
    async fn fetch_reminders(&self, predicate: &ReminderPredicate) -> Option<Vec<NativeReminder>>;

    /// Save and commit a reminder. Returns its calendar item identifier.
    fn save_reminder(&self, reminder: NativeReminder) -> StoreResult<String>;

    fn remove_reminder(&self, reminder: &NativeReminder) -> StoreResult<()>;
}
