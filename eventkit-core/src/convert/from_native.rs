use super::Translator;
use crate::native::{
    DueDateComponents, NativeCalendar, NativeEvent, NativeRecurrenceRule, NativeReminder, RecurrenceEnd,
};
use crate::record::{CalendarRecord, DateTimeRecord, EventRecord, RecurrenceRuleRecord, ReminderRecord};

/// Format the first three color components as `#RRGGBB`.
///
/// Each channel is scaled by 255 and truncated. Returns `None` when fewer
/// than three components are present.
pub fn format_color(components: &[f64]) -> Option<String> {
    let [red, green, blue, ..] = components else {
        return None;
    };

    let channel = |value: f64| (value * 255.0).clamp(0.0, 255.0) as u8;

    Some(format!(
        "#{:02X}{:02X}{:02X}",
        channel(*red),
        channel(*green),
        channel(*blue)
    ))
}

impl Translator {
    pub fn calendar(&self, calendar: &NativeCalendar) -> CalendarRecord {
        CalendarRecord {
            identifier: calendar.calendar_identifier.clone(),
            title: calendar.title.clone(),
            source: calendar.source.title.clone(),
            color: calendar
                .color
                .as_ref()
                .and_then(|color| format_color(&color.components)),
            is_editable: calendar.allows_content_modifications,
            is_subscribed: calendar.is_subscribed,
            external_id: calendar.external_identifier.clone(),
        }
    }

    pub fn event(&self, event: &NativeEvent) -> EventRecord {
        let attendee_emails = if self.exposes_attendees {
            event.attendees.as_ref().map(|attendees| {
                attendees
                    .iter()
                    .filter_map(|a| a.email_address.clone())
                    .collect()
            })
        } else {
            None
        };

        EventRecord {
            identifier: event.event_identifier.clone(),
            title: event.title.clone(),
            notes: event.notes.clone(),
            start_date: self.date_time(event.start_date),
            end_date: self.date_time(event.end_date),
            is_all_day: event.is_all_day,
            location: event.location.clone(),
            url: event.url.as_ref().map(|url| url.to_string()),
            availability: event.availability.into(),
            status: event.status.into(),
            calendar_id: event.calendar.identifier().map(str::to_owned),
            attendee_emails,
            recurrence_rule: event
                .recurrence_rules
                .as_ref()
                .and_then(|rules| rules.first())
                .map(|rule| self.recurrence_rule(rule)),
        }
    }

    pub fn reminder(&self, reminder: &NativeReminder) -> ReminderRecord {
        let completion_date = if reminder.is_completed {
            reminder.completion_date.map(|date| self.date_time(date))
        } else {
            None
        };

        ReminderRecord {
            identifier: reminder.calendar_item_identifier.clone(),
            title: reminder.title.clone(),
            notes: reminder.notes.clone(),
            due_date: reminder
                .due_date_components
                .as_ref()
                .and_then(|components| self.due_date(components)),
            completion_date,
            is_completed: reminder.is_completed,
            calendar_id: reminder.calendar.identifier().map(str::to_owned),
            priority: Some(reminder.priority),
        }
    }

    pub fn recurrence_rule(&self, rule: &NativeRecurrenceRule) -> RecurrenceRuleRecord {
        let (end_date, occurrence_count) = match rule.recurrence_end {
            Some(RecurrenceEnd::Date(date)) => (Some(self.date_time(date)), None),
            Some(RecurrenceEnd::OccurrenceCount(count)) => (None, Some(i64::from(count))),
            None => (None, None),
        };

        RecurrenceRuleRecord {
            frequency: rule.frequency.into(),
            interval: rule.interval,
            end_date,
            occurrence_count,
            days_of_the_week: rule
                .days_of_the_week
                .as_ref()
                .map(|days| days.iter().map(|d| d.day_of_the_week).collect()),
            days_of_the_month: rule.days_of_the_month.clone(),
            months_of_the_year: rule.months_of_the_year.clone(),
        }
    }

    /// Resolve due-date components to calendar fields. Components carry no
    /// seconds, so the result always has `second == 0`. `None` when the
    /// components do not name a date.
    fn due_date(&self, components: &DueDateComponents) -> Option<DateTimeRecord> {
        components
            .resolve(self.zone)
            .map(|instant| self.date_time(instant))
    }
}
