use chrono::{Datelike, Timelike};
use url::Url;

use super::Translator;
use crate::error::{BridgeError, BridgeResult};
use crate::native::{CalendarBinding, DueDateComponents, NativeEvent, NativeReminder};
use crate::record::{DateTimeRecord, EventRecord, ReminderRecord};

impl Translator {
    /// Build an unsaved native event from a wire record.
    ///
    /// The identifier is left for the host to assign and the status is not
    /// written: the host computes it. Recurrence and attendees are read-only
    /// on the wire and are not carried over either.
    pub fn native_event(&self, record: &EventRecord, calendar: CalendarBinding) -> BridgeResult<NativeEvent> {
        let mut event = NativeEvent::new(
            self.instant(&record.start_date)?,
            self.instant(&record.end_date)?,
        );

        event.title = record.title.clone();
        event.notes = record.notes.clone();
        event.is_all_day = record.is_all_day;
        event.location = record.location.clone();
        event.url = record.url.as_deref().map(parse_url).transpose()?;
        event.availability = record.availability.into();
        event.calendar = calendar;

        Ok(event)
    }

    /// Build an unsaved native reminder from a wire record.
    pub fn native_reminder(
        &self,
        record: &ReminderRecord,
        calendar: CalendarBinding,
    ) -> BridgeResult<NativeReminder> {
        let due_date_components = record
            .due_date
            .as_ref()
            .map(|due| self.due_date_components(due))
            .transpose()?;

        Ok(NativeReminder {
            calendar_item_identifier: None,
            title: record.title.clone(),
            notes: record.notes.clone(),
            due_date_components,
            completion_date: None,
            is_completed: record.is_completed,
            calendar,
            priority: record.priority.unwrap_or(0),
        })
    }

    /// Seconds and milliseconds are dropped: the host keeps due dates to the
    /// minute.
    fn due_date_components(&self, due: &DateTimeRecord) -> BridgeResult<DueDateComponents> {
        let wall = self.zone.wall_clock(self.instant(due)?);

        Ok(DueDateComponents {
            year: Some(i64::from(wall.year())),
            month: Some(i64::from(wall.month())),
            day: Some(i64::from(wall.day())),
            hour: Some(i64::from(wall.hour())),
            minute: Some(i64::from(wall.minute())),
        })
    }
}

fn parse_url(url: &str) -> BridgeResult<Url> {
    Url::parse(url).map_err(|source| BridgeError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}
