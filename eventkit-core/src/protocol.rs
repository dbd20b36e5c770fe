//! Message protocol between the external application and the bridge.
//!
//! One JSON request per line in, one JSON response per line out. Param
//! and result payloads are the wire records from [`crate::record`].

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::BridgeError;
use crate::record::{AuthorizationStatus, CalendarRecord, DateTimeRecord, EventRecord, ReminderRecord};

/// A command's params type, tied to its name and result type.
pub trait BridgeCommand: Serialize + DeserializeOwned {
    type Response: Serialize + DeserializeOwned;
    fn command() -> Command;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    RequestCalendarAccess,
    GetCalendarAuthorizationStatus,
    RequestReminderAccess,
    GetReminderAuthorizationStatus,
    GetCalendars,
    GetCalendar,
    GetReminderCalendars,
    GetDefaultReminderCalendar,
    GetEvents,
    GetEvent,
    SaveEvent,
    RemoveEvent,
    GetReminders,
    SaveReminder,
    RemoveReminder,
    GetIncompleteReminders,
    GetCompletedReminders,
}

/// Request sent from the application to the bridge.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

impl Request {
    pub fn new<C: BridgeCommand>(params: &C) -> Result<Self, serde_json::Error> {
        Ok(Self {
            command: C::command(),
            params: serde_json::to_value(params)?,
        })
    }
}

/// Response sent from the bridge to the application.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success {
        data: T,
    },
    Error {
        error: String,
        #[serde(default)]
        code: Option<String>,
    },
}

impl<T: Serialize> Response<T> {
    pub fn success(data: T) -> String {
        serde_json::to_string(&Response::Success { data })
            .unwrap_or_else(|e| Response::<()>::error(&format!("Failed to encode response: {}", e)))
    }
}

impl Response<()> {
    pub fn error(msg: &str) -> String {
        serde_json::json!({ "status": "error", "error": msg }).to_string()
    }

    pub fn failure(err: &BridgeError) -> String {
        serde_json::json!({
            "status": "error",
            "error": err.to_string(),
            "code": err.code(),
        })
        .to_string()
    }
}

// ============================================================================
// Access
// ============================================================================

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RequestCalendarAccess {}

impl BridgeCommand for RequestCalendarAccess {
    type Response = bool;
    fn command() -> Command {
        Command::RequestCalendarAccess
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GetCalendarAuthorizationStatus {}

impl BridgeCommand for GetCalendarAuthorizationStatus {
    type Response = AuthorizationStatus;
    fn command() -> Command {
        Command::GetCalendarAuthorizationStatus
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RequestReminderAccess {}

impl BridgeCommand for RequestReminderAccess {
    type Response = bool;
    fn command() -> Command {
        Command::RequestReminderAccess
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GetReminderAuthorizationStatus {}

impl BridgeCommand for GetReminderAuthorizationStatus {
    type Response = AuthorizationStatus;
    fn command() -> Command {
        Command::GetReminderAuthorizationStatus
    }
}

// ============================================================================
// Calendars
// ============================================================================

/// Event calendars.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GetCalendars {}

impl BridgeCommand for GetCalendars {
    type Response = Vec<CalendarRecord>;
    fn command() -> Command {
        Command::GetCalendars
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetCalendar {
    pub identifier: String,
}

impl BridgeCommand for GetCalendar {
    type Response = Option<CalendarRecord>;
    fn command() -> Command {
        Command::GetCalendar
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GetReminderCalendars {}

impl BridgeCommand for GetReminderCalendars {
    type Response = Vec<CalendarRecord>;
    fn command() -> Command {
        Command::GetReminderCalendars
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GetDefaultReminderCalendar {}

impl BridgeCommand for GetDefaultReminderCalendar {
    type Response = Option<CalendarRecord>;
    fn command() -> Command {
        Command::GetDefaultReminderCalendar
    }
}

// ============================================================================
// Events
// ============================================================================

/// Events intersecting `[start_date, end_date)`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetEvents {
    pub start_date: DateTimeRecord,
    pub end_date: DateTimeRecord,
    #[serde(default)]
    pub calendar_identifiers: Option<Vec<String>>,
}

impl BridgeCommand for GetEvents {
    type Response = Vec<EventRecord>;
    fn command() -> Command {
        Command::GetEvents
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetEvent {
    pub identifier: String,
}

impl BridgeCommand for GetEvent {
    type Response = Option<EventRecord>;
    fn command() -> Command {
        Command::GetEvent
    }
}

/// Save a new event. Returns the identifier the host assigned.
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveEvent {
    pub event: EventRecord,
}

impl BridgeCommand for SaveEvent {
    type Response = String;
    fn command() -> Command {
        Command::SaveEvent
    }
}

/// Returns `false` when no event has this identifier.
#[derive(Debug, Serialize, Deserialize)]
pub struct RemoveEvent {
    pub identifier: String,
}

impl BridgeCommand for RemoveEvent {
    type Response = bool;
    fn command() -> Command {
        Command::RemoveEvent
    }
}

// ============================================================================
// Reminders
// ============================================================================

/// `predicate`: absent for every reminder, `""` for every reminder
/// calendar, otherwise comma-separated calendar identifiers.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GetReminders {
    #[serde(default)]
    pub predicate: Option<String>,
}

impl BridgeCommand for GetReminders {
    type Response = Vec<ReminderRecord>;
    fn command() -> Command {
        Command::GetReminders
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveReminder {
    pub reminder: ReminderRecord,
}

impl BridgeCommand for SaveReminder {
    type Response = String;
    fn command() -> Command {
        Command::SaveReminder
    }
}

/// Always answered with `false`: the host has no reminder lookup by
/// identifier.
#[derive(Debug, Serialize, Deserialize)]
pub struct RemoveReminder {
    pub identifier: String,
}

impl BridgeCommand for RemoveReminder {
    type Response = bool;
    fn command() -> Command {
        Command::RemoveReminder
    }
}

/// Incomplete reminders due in `[start_date, end_date)`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetIncompleteReminders {
    #[serde(default)]
    pub calendar_identifiers: Option<Vec<String>>,
    #[serde(default)]
    pub start_date: Option<DateTimeRecord>,
    #[serde(default)]
    pub end_date: Option<DateTimeRecord>,
}

impl BridgeCommand for GetIncompleteReminders {
    type Response = Vec<ReminderRecord>;
    fn command() -> Command {
        Command::GetIncompleteReminders
    }
}

/// Completed reminders finished in `[start_date, end_date)`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCompletedReminders {
    #[serde(default)]
    pub calendar_identifiers: Option<Vec<String>>,
    #[serde(default)]
    pub start_date: Option<DateTimeRecord>,
    #[serde(default)]
    pub end_date: Option<DateTimeRecord>,
}

impl BridgeCommand for GetCompletedReminders {
    type Response = Vec<ReminderRecord>;
    fn command() -> Command {
        Command::GetCompletedReminders
    }
}
