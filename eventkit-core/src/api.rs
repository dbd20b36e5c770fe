//! Request dispatch.
//!
//! `HostApi` is the message surface: each command resolves its inputs
//! through the Store Adapter, runs the translator and hands back a wire
//! value. Every request gets exactly one response.

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};

use crate::adapter::StoreAdapter;
use crate::convert::Translator;
use crate::error::{BridgeError, BridgeResult};
use crate::native::{NativeCalendar, NativeReminder};
use crate::protocol::*;
use crate::record::{AuthorizationStatus, CalendarRecord, DateTimeRecord, EventRecord, ReminderRecord};
use crate::store::{EntityType, HostStore};
use crate::zone::HostTimeZone;

pub struct HostApi<S> {
    adapter: StoreAdapter<S>,
    translator: Translator,
}

impl<S: HostStore> HostApi<S> {
    pub fn new(adapter: StoreAdapter<S>, zone: HostTimeZone) -> Self {
        let translator =
            Translator::new(zone).with_attendees(adapter.capabilities().exposes_attendees);
        Self { adapter, translator }
    }

    pub fn adapter(&self) -> &StoreAdapter<S> {
        &self.adapter
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Decode one request line and answer it.
    pub async fn handle_line(&self, line: &str) -> String {
        match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle(request).await,
            Err(e) => Response::error(&format!("Failed to parse request: {}", e)),
        }
    }

    pub async fn handle(&self, request: Request) -> String {
        let command = request.command;
        debug!(?command, "handling request");

        match self.dispatch(request).await {
            Ok(data) => Response::success(data),
            Err(e) => {
                warn!(?command, error = %e, "request failed");
                Response::failure(&e)
            }
        }
    }

    async fn dispatch(&self, request: Request) -> BridgeResult<Value> {
        let params = request.params;

        match request.command {
            Command::RequestCalendarAccess => reply(self.request_calendar_access().await),
            Command::GetCalendarAuthorizationStatus => {
                reply(self.get_calendar_authorization_status())
            }
            Command::RequestReminderAccess => reply(self.request_reminder_access().await),
            Command::GetReminderAuthorizationStatus => {
                reply(self.get_reminder_authorization_status())
            }
            Command::GetCalendars => reply(self.get_calendars()),
            Command::GetCalendar => reply(self.get_calendar(parse(params)?)),
            Command::GetReminderCalendars => reply(self.get_reminder_calendars()),
            Command::GetDefaultReminderCalendar => reply(self.get_default_reminder_calendar()),
            Command::GetEvents => reply(self.get_events(parse(params)?)?),
            Command::GetEvent => reply(self.get_event(parse(params)?)),
            Command::SaveEvent => reply(self.save_event(parse(params)?)?),
            Command::RemoveEvent => reply(self.remove_event(parse(params)?)?),
            Command::GetReminders => reply(self.get_reminders(parse(params)?).await?),
            Command::SaveReminder => reply(self.save_reminder(parse(params)?)?),
            Command::RemoveReminder => reply(self.remove_reminder(parse(params)?)),
            Command::GetIncompleteReminders => {
                reply(self.get_incomplete_reminders(parse(params)?).await?)
            }
            Command::GetCompletedReminders => {
                reply(self.get_completed_reminders(parse(params)?).await?)
            }
        }
    }

    // ==================================================================
    // Access
    // ==================================================================

    pub async fn request_calendar_access(&self) -> bool {
        self.adapter.request_calendar_access().await
    }

    pub fn get_calendar_authorization_status(&self) -> AuthorizationStatus {
        self.adapter.authorization_status(EntityType::Event).into()
    }

    pub async fn request_reminder_access(&self) -> bool {
        self.adapter.request_reminder_access().await
    }

    pub fn get_reminder_authorization_status(&self) -> AuthorizationStatus {
        self.adapter.authorization_status(EntityType::Reminder).into()
    }

    // ==================================================================
    // Calendars
    // ==================================================================

    pub fn get_calendars(&self) -> Vec<CalendarRecord> {
        self.calendar_records(self.adapter.calendars(EntityType::Event))
    }

    pub fn get_calendar(&self, cmd: GetCalendar) -> Option<CalendarRecord> {
        self.adapter
            .calendar(&cmd.identifier)
            .map(|c| self.translator.calendar(&c))
    }

    pub fn get_reminder_calendars(&self) -> Vec<CalendarRecord> {
        self.calendar_records(self.adapter.calendars(EntityType::Reminder))
    }

    pub fn get_default_reminder_calendar(&self) -> Option<CalendarRecord> {
        self.adapter
            .default_reminder_calendar()
            .map(|c| self.translator.calendar(&c))
    }

    fn calendar_records(&self, calendars: Vec<NativeCalendar>) -> Vec<CalendarRecord> {
        calendars.iter().map(|c| self.translator.calendar(c)).collect()
    }

    /// Look up each identifier, skipping the ones that do not resolve.
    fn resolve_calendars(&self, identifiers: Option<&[String]>) -> Option<Vec<NativeCalendar>> {
        identifiers.map(|ids| {
            ids.iter()
                .filter_map(|id| {
                    let calendar = self.adapter.calendar(id);
                    if calendar.is_none() {
                        debug!(calendar = %id, "skipping unknown calendar");
                    }
                    calendar
                })
                .collect()
        })
    }

    // ==================================================================
    // Events
    // ==================================================================

    pub fn get_events(&self, cmd: GetEvents) -> BridgeResult<Vec<EventRecord>> {
        let start = self.translator.instant(&cmd.start_date)?;
        let end = self.translator.instant(&cmd.end_date)?;
        let calendars = self.resolve_calendars(cmd.calendar_identifiers.as_deref());

        let events = self.adapter.events(start, end, calendars.as_deref());
        Ok(events.iter().map(|e| self.translator.event(e)).collect())
    }

    pub fn get_event(&self, cmd: GetEvent) -> Option<EventRecord> {
        self.adapter
            .event(&cmd.identifier)
            .map(|e| self.translator.event(&e))
    }

    /// Save `cmd.event` as a new event. A `calendarId` that does not
    /// resolve leaves the event unattached, which the host then refuses.
    pub fn save_event(&self, cmd: SaveEvent) -> BridgeResult<String> {
        let calendar = match cmd.event.calendar_id.as_deref() {
            Some(id) => {
                let calendar = self.adapter.calendar(id);
                if calendar.is_none() {
                    warn!(calendar = %id, "event calendar not found, saving unattached");
                }
                calendar
            }
            None => None,
        };

        let event = self.translator.native_event(&cmd.event, calendar.into())?;
        self.adapter.save_event(event).map_err(BridgeError::EventSave)
    }

    pub fn remove_event(&self, cmd: RemoveEvent) -> BridgeResult<bool> {
        let Some(event) = self.adapter.event(&cmd.identifier) else {
            return Ok(false);
        };

        self.adapter
            .remove_event(&event)
            .map_err(BridgeError::EventRemove)?;
        Ok(true)
    }

    // ==================================================================
    // Reminders
    // ==================================================================

    pub async fn get_reminders(&self, cmd: GetReminders) -> BridgeResult<Vec<ReminderRecord>> {
        let calendars = match cmd.predicate.as_deref() {
            None => None,
            Some(token) => self.predicate_calendars(token)?,
        };

        let reminders = self.adapter.all_reminders(calendars.as_deref()).await;
        Ok(self.reminder_records(&reminders))
    }

    /// Calendars named by a reminder predicate token. `""` means every
    /// reminder calendar.
    fn predicate_calendars(&self, token: &str) -> BridgeResult<Option<Vec<NativeCalendar>>> {
        if token.is_empty() {
            return Ok(None);
        }

        token
            .split(',')
            .map(str::trim)
            .map(|id| {
                if id.is_empty() {
                    return Err(BridgeError::InvalidPredicate(format!(
                        "empty calendar identifier in '{}'",
                        token
                    )));
                }
                self.adapter
                    .calendar(id)
                    .ok_or_else(|| BridgeError::InvalidPredicate(format!("unknown calendar '{}'", id)))
            })
            .collect::<BridgeResult<Vec<_>>>()
            .map(Some)
    }

    /// Save `cmd.reminder` as a new reminder. Calendar: explicit
    /// `calendarId`, else the default reminder calendar, else unattached.
    pub fn save_reminder(&self, cmd: SaveReminder) -> BridgeResult<String> {
        let calendar = cmd
            .reminder
            .calendar_id
            .as_deref()
            .and_then(|id| self.adapter.calendar(id))
            .or_else(|| self.adapter.default_reminder_calendar());

        let reminder = self
            .translator
            .native_reminder(&cmd.reminder, calendar.into())?;
        self.adapter
            .save_reminder(reminder)
            .map_err(BridgeError::ReminderSave)
    }

    /// Always `false`. The host offers no lookup of a reminder by its
    /// identifier, so there is nothing to hand to the remove call.
    pub fn remove_reminder(&self, cmd: RemoveReminder) -> bool {
        warn!(identifier = %cmd.identifier, "reminder removal by identifier is not supported");
        false
    }

    pub async fn get_incomplete_reminders(
        &self,
        cmd: GetIncompleteReminders,
    ) -> BridgeResult<Vec<ReminderRecord>> {
        let start = self.optional_instant(cmd.start_date.as_ref())?;
        let end = self.optional_instant(cmd.end_date.as_ref())?;
        let calendars = self.resolve_calendars(cmd.calendar_identifiers.as_deref());

        let reminders = self
            .adapter
            .incomplete_reminders(start, end, calendars.as_deref())
            .await;
        Ok(self.reminder_records(&reminders))
    }

    pub async fn get_completed_reminders(
        &self,
        cmd: GetCompletedReminders,
    ) -> BridgeResult<Vec<ReminderRecord>> {
        let start = self.optional_instant(cmd.start_date.as_ref())?;
        let end = self.optional_instant(cmd.end_date.as_ref())?;
        let calendars = self.resolve_calendars(cmd.calendar_identifiers.as_deref());

        let reminders = self
            .adapter
            .completed_reminders(start, end, calendars.as_deref())
            .await;
        Ok(self.reminder_records(&reminders))
    }

    fn reminder_records(&self, reminders: &[NativeReminder]) -> Vec<ReminderRecord> {
        reminders.iter().map(|r| self.translator.reminder(r)).collect()
    }

    fn optional_instant(&self, record: Option<&DateTimeRecord>) -> BridgeResult<Option<DateTime<Utc>>> {
        record.map(|r| self.translator.instant(r)).transpose()
    }
}

/// Decode command params. Commands whose params are all optional accept a
/// missing `params` field.
fn parse<C: DeserializeOwned>(params: Value) -> BridgeResult<C> {
    let params = if params.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        params
    };
    Ok(serde_json::from_value(params)?)
}

fn reply<T: Serialize>(data: T) -> BridgeResult<Value> {
    Ok(serde_json::to_value(data)?)
}
