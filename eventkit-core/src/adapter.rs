//! Store Adapter: one host store call per logical operation.
//!
//! No conversion happens here; callers get native records back. The
//! adapter only builds predicates and normalizes the few host behaviors
//! that differ between platform versions (see [`Capabilities`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::native::{NativeAuthorizationStatus, NativeCalendar, NativeEvent, NativeReminder};
use crate::store::{EntityType, EventPredicate, HostStore, ReminderPredicate};

/// Host feature levels, resolved once when the adapter is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    /// Host has the full-access permission request (newer OS versions).
    #[serde(default)]
    pub full_access_api: bool,
    /// Host exposes event participants.
    #[serde(default)]
    pub exposes_attendees: bool,
}

pub struct StoreAdapter<S> {
    store: S,
    capabilities: Capabilities,
}

impl<S: HostStore> StoreAdapter<S> {
    pub fn new(store: S) -> Self {
        let capabilities = store.capabilities();
        Self::with_capabilities(store, capabilities)
    }

    pub fn with_capabilities(store: S, capabilities: Capabilities) -> Self {
        debug!(?capabilities, "store adapter ready");
        Self { store, capabilities }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ==================================================================
    // Access
    // ==================================================================

    /// Prompt for access if needed. Denial is `false`; so is a host error
    /// while prompting.
    pub async fn request_access(&self, entity: EntityType) -> bool {
        let result = if self.capabilities.full_access_api {
            self.store.request_full_access(entity).await
        } else {
            self.store.request_access(entity).await
        };

        result.unwrap_or_else(|e| {
            warn!(%entity, error = %e, "access request failed");
            false
        })
    }

    pub async fn request_calendar_access(&self) -> bool {
        self.request_access(EntityType::Event).await
    }

    pub async fn request_reminder_access(&self) -> bool {
        self.request_access(EntityType::Reminder).await
    }

    /// Current grant. Never prompts.
    pub fn authorization_status(&self, entity: EntityType) -> NativeAuthorizationStatus {
        self.store.authorization_status(entity)
    }

    // ==================================================================
    // Calendars
    // ==================================================================

    pub fn calendars(&self, entity: EntityType) -> Vec<NativeCalendar> {
        self.store.calendars(entity)
    }

    pub fn calendar(&self, identifier: &str) -> Option<NativeCalendar> {
        self.store.calendar(identifier)
    }

    pub fn default_reminder_calendar(&self) -> Option<NativeCalendar> {
        self.store.default_calendar_for_new_reminders()
    }

    // ==================================================================
    // Events
    // ==================================================================

    /// Events intersecting `[start, end)`. `calendars: None` searches all
    /// event calendars.
    pub fn events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        calendars: Option<&[NativeCalendar]>,
    ) -> Vec<NativeEvent> {
        let predicate = EventPredicate {
            start,
            end,
            calendars: calendar_ids(calendars),
        };
        self.store.events(&predicate)
    }

    pub fn event(&self, identifier: &str) -> Option<NativeEvent> {
        self.store.event(identifier)
    }

    pub fn save_event(&self, event: NativeEvent) -> StoreResult<String> {
        self.store.save_event(event)
    }

    pub fn remove_event(&self, event: &NativeEvent) -> StoreResult<()> {
        self.store.remove_event(event)
    }

    // ==================================================================
    // Reminders
    // ==================================================================

    /// A host that reports no result set yields an empty list.
    pub async fn reminders(&self, predicate: &ReminderPredicate) -> Vec<NativeReminder> {
        self.store
            .fetch_reminders(predicate)
            .await
            .unwrap_or_default()
    }

    pub async fn all_reminders(&self, calendars: Option<&[NativeCalendar]>) -> Vec<NativeReminder> {
        let predicate = ReminderPredicate::All {
            calendars: calendar_ids(calendars),
        };
        self.reminders(&predicate).await
    }

    pub async fn incomplete_reminders(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        calendars: Option<&[NativeCalendar]>,
    ) -> Vec<NativeReminder> {
        let predicate = ReminderPredicate::Incomplete {
            due_start: start,
            due_end: end,
            calendars: calendar_ids(calendars),
        };
        self.reminders(&predicate).await
    }

    pub async fn completed_reminders(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        calendars: Option<&[NativeCalendar]>,
    ) -> Vec<NativeReminder> {
        let predicate = ReminderPredicate::Completed {
            completion_start: start,
            completion_end: end,
            calendars: calendar_ids(calendars),
        };
        self.reminders(&predicate).await
    }

    pub fn save_reminder(&self, reminder: NativeReminder) -> StoreResult<String> {
        self.store.save_reminder(reminder)
    }

    pub fn remove_reminder(&self, reminder: &NativeReminder) -> StoreResult<()> {
        self.store.remove_reminder(reminder)
    }
}

fn calendar_ids(calendars: Option<&[NativeCalendar]>) -> Option<Vec<String>> {
    calendars.map(|calendars| {
        calendars
            .iter()
            .map(|c| c.calendar_identifier.clone())
            .collect()
    })
}
