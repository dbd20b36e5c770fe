//! In-process host calendar store.
//!
//! `MemoryStore` behaves like the operating system's calendar service as far
//! as the bridge can observe it: separate grants per entity type, host
//! assigned identifiers, host computed event status, rejected saves on
//! unattached or read-only calendars. The bridge binary serves it when no
//! native store is available, seeded from a JSON file.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::adapter::Capabilities;
use crate::error::{StoreError, StoreResult};
use crate::native::{
    CalendarBinding, NativeAuthorizationStatus, NativeCalendar, NativeEvent, NativeEventStatus,
    NativeReminder,
};
use crate::store::{EntityType, EventPredicate, HostStore, ReminderPredicate};
use crate::zone::HostTimeZone;

/// Initial contents of a [`MemoryStore`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemorySeed {
    #[serde(default)]
    pub capabilities: Capabilities,
    #[serde(default)]
    pub calendars: Vec<NativeCalendar>,
    #[serde(default)]
    pub events: Vec<NativeEvent>,
    #[serde(default)]
    pub reminders: Vec<NativeReminder>,
    /// Identifier of the calendar new reminders go to.
    #[serde(default)]
    pub default_reminder_calendar: Option<String>,
    #[serde(default)]
    pub event_authorization: NativeAuthorizationStatus,
    #[serde(default)]
    pub reminder_authorization: NativeAuthorizationStatus,
    /// How the simulated user answers a permission prompt.
    #[serde(default = "default_grant")]
    pub grant_on_request: bool,
}

fn default_grant() -> bool {
    true
}

impl Default for MemorySeed {
    fn default() -> Self {
        Self {
            capabilities: Capabilities::default(),
            calendars: Vec::new(),
            events: Vec::new(),
            reminders: Vec::new(),
            default_reminder_calendar: None,
            event_authorization: NativeAuthorizationStatus::NotDetermined,
            reminder_authorization: NativeAuthorizationStatus::NotDetermined,
            grant_on_request: true,
        }
    }
}

pub struct MemoryStore {
    zone: HostTimeZone,
    state: Mutex<MemorySeed>,
}

impl MemoryStore {
    pub fn new(seed: MemorySeed, zone: HostTimeZone) -> Self {
        debug!(
            calendars = seed.calendars.len(),
            events = seed.events.len(),
            reminders = seed.reminders.len(),
            "memory store seeded"
        );
        Self {
            zone,
            state: Mutex::new(seed),
        }
    }

    fn state(&self) -> MutexGuard<'_, MemorySeed> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Answer a permission prompt. Undetermined grants take the simulated
    /// user's answer; decided grants are reported as they stand.
    fn prompt(&self, entity: EntityType) -> bool {
        let mut state = self.state();
        let answer = if state.grant_on_request {
            NativeAuthorizationStatus::FullAccess
        } else {
            NativeAuthorizationStatus::Denied
        };

        let status = match entity {
            EntityType::Event => &mut state.event_authorization,
            EntityType::Reminder => &mut state.reminder_authorization,
        };
        if *status == NativeAuthorizationStatus::NotDetermined {
            *status = answer;
        }
        *status == NativeAuthorizationStatus::FullAccess
    }
}

impl MemorySeed {
    fn authorization(&self, entity: EntityType) -> NativeAuthorizationStatus {
        match entity {
            EntityType::Event => self.event_authorization,
            EntityType::Reminder => self.reminder_authorization,
        }
    }

    fn can_read(&self, entity: EntityType) -> bool {
        self.authorization(entity) == NativeAuthorizationStatus::FullAccess
    }

    fn can_write(&self, entity: EntityType) -> bool {
        matches!(
            self.authorization(entity),
            NativeAuthorizationStatus::FullAccess | NativeAuthorizationStatus::WriteOnly
        )
    }

    /// Check that an item may be saved into the calendar it is bound to.
    fn writable_calendar(&self, binding: &CalendarBinding, entity: EntityType) -> StoreResult<()> {
        if !self.can_write(entity) {
            return Err(StoreError::AccessDenied(entity));
        }

        let Some(bound) = binding.calendar() else {
            return Err(StoreError::NoCalendar);
        };
        let calendar = self
            .calendars
            .iter()
            .find(|c| c.calendar_identifier == bound.calendar_identifier)
            .ok_or_else(|| StoreError::NotFound(bound.calendar_identifier.clone()))?;

        if !calendar.allows(entity) {
            return Err(StoreError::WrongEntityType {
                calendar: calendar.calendar_identifier.clone(),
                entity,
            });
        }
        if !calendar.allows_content_modifications {
            return Err(StoreError::ReadOnlyCalendar(calendar.calendar_identifier.clone()));
        }
        Ok(())
    }
}

fn in_calendars(binding: &CalendarBinding, calendars: Option<&Vec<String>>) -> bool {
    match calendars {
        None => true,
        Some(ids) => binding
            .identifier()
            .is_some_and(|id| ids.iter().any(|wanted| wanted == id)),
    }
}

fn in_range(instant: Option<DateTime<Utc>>, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> bool {
    if start.is_none() && end.is_none() {
        return true;
    }
    let Some(instant) = instant else {
        return false;
    };
    start.is_none_or(|start| instant >= start) && end.is_none_or(|end| instant < end)
}

fn new_identifier() -> String {
    Uuid::new_v4().to_string().to_uppercase()
}

#[async_trait]
impl HostStore for MemoryStore {
    fn capabilities(&self) -> Capabilities {
        self.state().capabilities
    }

    async fn request_access(&self, entity: EntityType) -> StoreResult<bool> {
        Ok(self.prompt(entity))
    }

    async fn request_full_access(&self, entity: EntityType) -> StoreResult<bool> {
        if !self.state().capabilities.full_access_api {
            return Err(StoreError::Storage(
                "full-access permission request is not available on this host".to_string(),
            ));
        }
        Ok(self.prompt(entity))
    }

    fn authorization_status(&self, entity: EntityType) -> NativeAuthorizationStatus {
        self.state().authorization(entity)
    }

    fn calendars(&self, entity: EntityType) -> Vec<NativeCalendar> {
        let state = self.state();
        if !state.can_read(entity) {
            return Vec::new();
        }
        state
            .calendars
            .iter()
            .filter(|c| c.allows(entity))
            .cloned()
            .collect()
    }

    fn calendar(&self, identifier: &str) -> Option<NativeCalendar> {
        self.state()
            .calendars
            .iter()
            .find(|c| c.calendar_identifier == identifier)
            .cloned()
    }

    fn default_calendar_for_new_reminders(&self) -> Option<NativeCalendar> {
        let state = self.state();
        let identifier = state.default_reminder_calendar.as_deref()?;
        state
            .calendars
            .iter()
            .find(|c| c.calendar_identifier == identifier)
            .cloned()
    }

    fn events(&self, predicate: &EventPredicate) -> Vec<NativeEvent> {
        let state = self.state();
        if !state.can_read(EntityType::Event) {
            return Vec::new();
        }
        state
            .events
            .iter()
            .filter(|e| in_calendars(&e.calendar, predicate.calendars.as_ref()))
            .filter(|e| {
                // Zero-length events at the range start still count.
                e.start_date < predicate.end
                    && (e.end_date > predicate.start || e.start_date >= predicate.start)
            })
            .cloned()
            .collect()
    }

    fn event(&self, identifier: &str) -> Option<NativeEvent> {
        let state = self.state();
        if !state.can_read(EntityType::Event) {
            return None;
        }
        state
            .events
            .iter()
            .find(|e| e.event_identifier.as_deref() == Some(identifier))
            .cloned()
    }

    fn save_event(&self, mut event: NativeEvent) -> StoreResult<String> {
        let mut state = self.state();
        state.writable_calendar(&event.calendar, EntityType::Event)?;

        let identifier = new_identifier();
        event.event_identifier = Some(identifier.clone());
        event.status = NativeEventStatus::None;
        state.events.push(event);

        debug!(%identifier, "event saved");
        Ok(identifier)
    }

    fn remove_event(&self, event: &NativeEvent) -> StoreResult<()> {
        let mut state = self.state();
        state.writable_calendar(&event.calendar, EntityType::Event)?;

        let identifier = event
            .event_identifier
            .as_deref()
            .ok_or_else(|| StoreError::NotFound("unsaved event".to_string()))?;
        let before = state.events.len();
        state
            .events
            .retain(|e| e.event_identifier.as_deref() != Some(identifier));

        if state.events.len() == before {
            return Err(StoreError::NotFound(identifier.to_string()));
        }
        debug!(%identifier, "event removed");
        Ok(())
    }

    async fn fetch_reminders(&self, predicate: &ReminderPredicate) -> Option<Vec<NativeReminder>> {
        let state = self.state();
        if !state.can_read(EntityType::Reminder) {
            return None;
        }

        let matches = |r: &&NativeReminder| match predicate {
            ReminderPredicate::All { calendars } => in_calendars(&r.calendar, calendars.as_ref()),
            ReminderPredicate::Incomplete {
                due_start,
                due_end,
                calendars,
            } => {
                let due = r.due_date_components.and_then(|c| c.resolve(self.zone));
                !r.is_completed
                    && in_calendars(&r.calendar, calendars.as_ref())
                    && in_range(due, *due_start, *due_end)
            }
            ReminderPredicate::Completed {
                completion_start,
                completion_end,
                calendars,
            } => {
                r.is_completed
                    && in_calendars(&r.calendar, calendars.as_ref())
                    && in_range(r.completion_date, *completion_start, *completion_end)
            }
        };

        Some(state.reminders.iter().filter(matches).cloned().collect())
    }

    fn save_reminder(&self, mut reminder: NativeReminder) -> StoreResult<String> {
        let mut state = self.state();
        state.writable_calendar(&reminder.calendar, EntityType::Reminder)?;

        let identifier = new_identifier();
        reminder.calendar_item_identifier = Some(identifier.clone());
        reminder.completion_date = match (reminder.is_completed, reminder.completion_date) {
            (true, Some(date)) => Some(date),
            (true, None) => Some(Utc::now()),
            (false, _) => None,
        };
        state.reminders.push(reminder);

        debug!(%identifier, "reminder saved");
        Ok(identifier)
    }

    fn remove_reminder(&self, reminder: &NativeReminder) -> StoreResult<()> {
        let mut state = self.state();
        state.writable_calendar(&reminder.calendar, EntityType::Reminder)?;

        let identifier = reminder
            .calendar_item_identifier
            .as_deref()
            .ok_or_else(|| StoreError::NotFound("unsaved reminder".to_string()))?;
        let before = state.reminders.len();
        state
            .reminders
            .retain(|r| r.calendar_item_identifier.as_deref() != Some(identifier));

        if state.reminders.len() == before {
            return Err(StoreError::NotFound(identifier.to_string()));
        }
        Ok(())
    }
}
