//! End-to-end tests of the message surface against an in-memory host store.

use chrono::{TimeZone, Utc};
use eventkit_core::memory::MemorySeed;
use eventkit_core::native::{
    CalendarBinding, DueDateComponents, NativeAuthorizationStatus, NativeCalendar, NativeColor,
    NativeEvent, NativeFrequency, NativeRecurrenceRule, NativeReminder, NativeSource,
    RecurrenceEnd,
};
use eventkit_core::protocol::{GetEvents, SaveReminder};
use eventkit_core::record::{DateTimeRecord, ReminderRecord};
use eventkit_core::{Capabilities, EntityType, HostApi, HostTimeZone, MemoryStore, StoreAdapter};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn zone() -> HostTimeZone {
    HostTimeZone::named("Europe/London").unwrap()
}

fn calendar(id: &str, title: &str, entity: EntityType) -> NativeCalendar {
    NativeCalendar {
        calendar_identifier: id.to_string(),
        title: title.to_string(),
        source: NativeSource {
            title: "iCloud".to_string(),
        },
        color: Some(NativeColor::rgb(0.0, 0.5, 1.0)),
        allows_content_modifications: true,
        is_subscribed: false,
        external_identifier: None,
        allowed_entity_types: vec![entity],
    }
}

fn seed() -> MemorySeed {
    let work = calendar("cal-work", "Work", EntityType::Event);
    let mut holidays = calendar("cal-holidays", "Holidays", EntityType::Event);
    holidays.allows_content_modifications = false;
    holidays.is_subscribed = true;
    holidays.color = None;
    let todo = calendar("cal-todo", "Todo", EntityType::Reminder);
    let groceries = calendar("cal-groceries", "Groceries", EntityType::Reminder);

    let mut new_year = NativeEvent::new(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 59).unwrap(),
    );
    new_year.event_identifier = Some("evt-new-year".to_string());
    new_year.title = "New Year's Day".to_string();
    new_year.is_all_day = true;
    new_year.calendar = CalendarBinding::Attached(holidays.clone());

    let mut review = NativeEvent::new(
        Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 2, 11, 0, 0).unwrap(),
    );
    review.event_identifier = Some("evt-review".to_string());
    review.title = "Sprint review".to_string();
    review.calendar = CalendarBinding::Attached(work.clone());
    review.recurrence_rules = Some(vec![NativeRecurrenceRule {
        frequency: NativeFrequency::Weekly,
        interval: 2,
        recurrence_end: Some(RecurrenceEnd::OccurrenceCount(5)),
        days_of_the_week: None,
        days_of_the_month: None,
        months_of_the_year: None,
    }]);

    let milk = NativeReminder {
        calendar_item_identifier: Some("rem-milk".to_string()),
        title: "Milk".to_string(),
        due_date_components: Some(DueDateComponents {
            year: Some(2024),
            month: Some(1),
            day: Some(5),
            hour: Some(9),
            minute: Some(30),
        }),
        calendar: CalendarBinding::Attached(groceries.clone()),
        ..NativeReminder::default()
    };
    let taxes = NativeReminder {
        calendar_item_identifier: Some("rem-taxes".to_string()),
        title: "File taxes".to_string(),
        is_completed: true,
        completion_date: Some(Utc.with_ymd_and_hms(2024, 1, 3, 17, 0, 0).unwrap()),
        calendar: CalendarBinding::Attached(todo.clone()),
        priority: 1,
        ..NativeReminder::default()
    };

    MemorySeed {
        capabilities: Capabilities::default(),
        calendars: vec![work, holidays, todo, groceries],
        events: vec![new_year, review],
        reminders: vec![milk, taxes],
        default_reminder_calendar: Some("cal-todo".to_string()),
        event_authorization: NativeAuthorizationStatus::FullAccess,
        reminder_authorization: NativeAuthorizationStatus::FullAccess,
        grant_on_request: true,
    }
}

fn api_with(seed: MemorySeed) -> HostApi<MemoryStore> {
    let store = MemoryStore::new(seed, zone());
    HostApi::new(StoreAdapter::new(store), zone())
}

fn api() -> HostApi<MemoryStore> {
    api_with(seed())
}

async fn call(api: &HostApi<MemoryStore>, command: &str, params: Value) -> Value {
    let line = json!({ "command": command, "params": params }).to_string();
    let response: Value = serde_json::from_str(&api.handle_line(&line).await).unwrap();
    response
}

async fn data(api: &HostApi<MemoryStore>, command: &str, params: Value) -> Value {
    let response = call(api, command, params).await;
    assert_eq!(response["status"], "success", "unexpected response: {response}");
    response["data"].clone()
}

async fn error_code(api: &HostApi<MemoryStore>, command: &str, params: Value) -> String {
    let response = call(api, command, params).await;
    assert_eq!(response["status"], "error", "unexpected response: {response}");
    response["code"].as_str().unwrap_or_default().to_string()
}

fn date(year: i64, month: i64, day: i64) -> Value {
    json!({ "year": year, "month": month, "day": day, "hour": 0, "minute": 0, "second": 0, "millisecond": 0 })
}

// ============================================================================
// Access
// ============================================================================

#[tokio::test]
async fn test_access_prompt_grants_and_reports_authorized() {
    let api = api_with(MemorySeed {
        event_authorization: NativeAuthorizationStatus::NotDetermined,
        ..seed()
    });

    assert_eq!(
        data(&api, "getCalendarAuthorizationStatus", Value::Null).await,
        "notDetermined"
    );
    assert_eq!(data(&api, "requestCalendarAccess", Value::Null).await, true);
    assert_eq!(
        data(&api, "getCalendarAuthorizationStatus", Value::Null).await,
        "authorized"
    );
}

#[tokio::test]
async fn test_denial_is_a_false_result_not_an_error() {
    let api = api_with(MemorySeed {
        reminder_authorization: NativeAuthorizationStatus::NotDetermined,
        grant_on_request: false,
        ..seed()
    });

    assert_eq!(data(&api, "requestReminderAccess", Value::Null).await, false);
    assert_eq!(
        data(&api, "getReminderAuthorizationStatus", Value::Null).await,
        "denied"
    );
    // Calendar access is tracked separately.
    assert_eq!(
        data(&api, "getCalendarAuthorizationStatus", Value::Null).await,
        "authorized"
    );
}

#[tokio::test]
async fn test_unknown_host_authorization_reads_as_not_determined() {
    let api = api_with(MemorySeed {
        event_authorization: NativeAuthorizationStatus::Unknown(9),
        ..seed()
    });

    assert_eq!(
        data(&api, "getCalendarAuthorizationStatus", Value::Null).await,
        "notDetermined"
    );
}

// ============================================================================
// Calendars
// ============================================================================

#[tokio::test]
async fn test_calendars_are_split_by_entity_type() {
    let api = api();

    let calendars = data(&api, "getCalendars", Value::Null).await;
    let ids: Vec<&str> = calendars
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["identifier"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["cal-work", "cal-holidays"]);
    assert_eq!(calendars[0]["color"], "#007FFF");
    assert_eq!(calendars[1]["color"], Value::Null);
    assert_eq!(calendars[1]["isEditable"], false);
    assert_eq!(calendars[1]["isSubscribed"], true);

    let reminder_calendars = data(&api, "getReminderCalendars", Value::Null).await;
    assert_eq!(reminder_calendars.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_calendar_lookup() {
    let api = api();

    let calendar = data(&api, "getCalendar", json!({ "identifier": "cal-work" })).await;
    assert_eq!(calendar["title"], "Work");
    assert_eq!(calendar["source"], "iCloud");

    let missing = data(&api, "getCalendar", json!({ "identifier": "nope" })).await;
    assert_eq!(missing, Value::Null);

    let default = data(&api, "getDefaultReminderCalendar", Value::Null).await;
    assert_eq!(default["identifier"], "cal-todo");
}

#[tokio::test]
async fn test_no_default_reminder_calendar_is_null() {
    let api = api_with(MemorySeed {
        default_reminder_calendar: None,
        ..seed()
    });
    assert_eq!(
        data(&api, "getDefaultReminderCalendar", Value::Null).await,
        Value::Null
    );
}

// ============================================================================
// Events
// ============================================================================

#[tokio::test]
async fn test_all_day_event_found_by_day_range() {
    let api = api();

    let events = data(
        &api,
        "getEvents",
        json!({ "startDate": date(2024, 1, 1), "endDate": date(2024, 1, 2) }),
    )
    .await;

    let events = events.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["identifier"], "evt-new-year");
    assert_eq!(events[0]["isAllDay"], true);
    assert_eq!(events[0]["startDate"], date(2024, 1, 1));
}

#[tokio::test]
async fn test_events_limited_to_calendars() {
    let api = api();

    let records = api
        .get_events(GetEvents {
            start_date: DateTimeRecord::date(2024, 1, 1),
            end_date: DateTimeRecord::date(2024, 1, 8),
            calendar_identifiers: Some(vec!["cal-work".to_string(), "missing".to_string()]),
        })
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Sprint review");

    let none_resolve = data(
        &api,
        "getEvents",
        json!({
            "startDate": date(2024, 1, 1),
            "endDate": date(2024, 1, 8),
            "calendarIdentifiers": ["missing"],
        }),
    )
    .await;
    assert_eq!(none_resolve, json!([]));
}

#[tokio::test]
async fn test_weekly_rule_reports_occurrence_count_only() {
    let api = api();

    let event = data(&api, "getEvent", json!({ "identifier": "evt-review" })).await;
    assert_eq!(
        event["recurrenceRule"],
        json!({
            "frequency": "weekly",
            "interval": 2,
            "endDate": null,
            "occurrenceCount": 5,
            "daysOfTheWeek": null,
            "daysOfTheMonth": null,
            "monthsOfTheYear": null,
        })
    );
}

#[tokio::test]
async fn test_saved_event_status_is_host_computed() {
    let api = api();

    let id = data(
        &api,
        "saveEvent",
        json!({
            "event": {
                "title": "Lunch",
                "startDate": { "year": 2024, "month": 1, "day": 4, "hour": 12, "minute": 0, "second": 0, "millisecond": 0 },
                "endDate": { "year": 2024, "month": 1, "day": 4, "hour": 13, "minute": 0, "second": 0, "millisecond": 0 },
                "availability": "free",
                "status": "confirmed",
                "calendarId": "cal-work",
                "url": "https://lunch.example.com/",
            }
        }),
    )
    .await;
    let id = id.as_str().unwrap().to_string();
    assert!(!id.is_empty());

    let event = data(&api, "getEvent", json!({ "identifier": id })).await;
    assert_eq!(event["status"], "none");
    assert_eq!(event["availability"], "free");
    assert_eq!(event["calendarId"], "cal-work");
    assert_eq!(event["url"], "https://lunch.example.com/");
    assert_eq!(event["startDate"]["hour"], 12);
}

#[tokio::test]
async fn test_unknown_wire_enum_values_use_defaults() {
    let api = api();

    let id = data(
        &api,
        "saveEvent",
        json!({ "event": {
            "title": "Offsite",
            "startDate": date(2024, 1, 9),
            "endDate": date(2024, 1, 10),
            "availability": "outOfOffice",
            "status": "postponed",
            "calendarId": "cal-work",
        }}),
    )
    .await;

    let event = data(&api, "getEvent", json!({ "identifier": id })).await;
    assert_eq!(event["availability"], "notSupported");
    assert_eq!(event["status"], "none");
}

#[tokio::test]
async fn test_event_without_resolvable_calendar_fails_to_save() {
    let api = api();
    let event = json!({
        "title": "Orphan",
        "startDate": date(2024, 1, 4),
        "endDate": date(2024, 1, 4),
    });

    let code = error_code(&api, "saveEvent", json!({ "event": event.clone() })).await;
    assert_eq!(code, "event_save_failed");

    let mut with_unknown = event;
    with_unknown["calendarId"] = json!("nope");
    let code = error_code(&api, "saveEvent", json!({ "event": with_unknown })).await;
    assert_eq!(code, "event_save_failed");
}

#[tokio::test]
async fn test_event_in_read_only_calendar_fails_to_save() {
    let api = api();
    let code = error_code(
        &api,
        "saveEvent",
        json!({ "event": {
            "title": "Extra holiday",
            "startDate": date(2024, 1, 4),
            "endDate": date(2024, 1, 5),
            "calendarId": "cal-holidays",
        }}),
    )
    .await;
    assert_eq!(code, "event_save_failed");
}

#[tokio::test]
async fn test_remove_event() {
    let api = api();

    assert_eq!(
        data(&api, "removeEvent", json!({ "identifier": "evt-review" })).await,
        true
    );
    assert_eq!(
        data(&api, "getEvent", json!({ "identifier": "evt-review" })).await,
        Value::Null
    );
    assert_eq!(
        data(&api, "removeEvent", json!({ "identifier": "evt-review" })).await,
        false
    );
}

#[tokio::test]
async fn test_remove_event_from_read_only_calendar_fails() {
    let api = api();
    let code = error_code(&api, "removeEvent", json!({ "identifier": "evt-new-year" })).await;
    assert_eq!(code, "event_remove_failed");
}

#[tokio::test]
async fn test_invalid_dates_fail_fast() {
    let api = api();
    let code = error_code(
        &api,
        "getEvents",
        json!({ "startDate": date(2024, 2, 30), "endDate": date(2024, 3, 1) }),
    )
    .await;
    assert_eq!(code, "invalid_date_time");
}

// ============================================================================
// Reminders
// ============================================================================

#[tokio::test]
async fn test_reminder_without_calendar_goes_to_default_calendar() {
    let api = api();

    let id = api
        .save_reminder(SaveReminder {
            reminder: ReminderRecord {
                identifier: None,
                title: "Call the plumber".to_string(),
                notes: None,
                due_date: Some(DateTimeRecord::new(2024, 1, 6, 8, 0, 45)),
                completion_date: None,
                is_completed: false,
                calendar_id: None,
                priority: None,
            },
        })
        .unwrap();

    let reminders = data(&api, "getReminders", json!({ "predicate": "cal-todo" })).await;
    let saved = reminders
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["identifier"] == id.as_str())
        .cloned()
        .unwrap();
    assert_eq!(saved["calendarId"], "cal-todo");
    assert_eq!(saved["priority"], 0);
    assert_eq!(saved["dueDate"]["second"], 0);
    assert_eq!(saved["dueDate"]["minute"], 0);
    assert_eq!(saved["dueDate"]["hour"], 8);
}

#[tokio::test]
async fn test_reminder_with_unknown_calendar_falls_back_to_default() {
    let api = api();
    let id = data(
        &api,
        "saveReminder",
        json!({ "reminder": { "title": "Water plants", "calendarId": "gone" } }),
    )
    .await;

    let reminders = data(&api, "getReminders", Value::Null).await;
    let saved = reminders
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["identifier"] == id)
        .cloned()
        .unwrap();
    assert_eq!(saved["calendarId"], "cal-todo");
}

#[tokio::test]
async fn test_reminder_without_any_calendar_fails_with_named_error() {
    let api = api_with(MemorySeed {
        default_reminder_calendar: None,
        ..seed()
    });
    let code = error_code(
        &api,
        "saveReminder",
        json!({ "reminder": { "title": "Nowhere to go" } }),
    )
    .await;
    assert_eq!(code, "reminder_save_failed");
}

#[tokio::test]
async fn test_remove_reminder_always_reports_false() {
    let api = api();

    for id in ["rem-milk", "rem-taxes", "", "does-not-exist"] {
        assert_eq!(
            data(&api, "removeReminder", json!({ "identifier": id })).await,
            false
        );
    }

    let reminders = data(&api, "getReminders", Value::Null).await;
    assert_eq!(reminders.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_reminder_predicate_tokens() {
    let api = api();

    let all = data(&api, "getReminders", json!({})).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let every_calendar = data(&api, "getReminders", json!({ "predicate": "" })).await;
    assert_eq!(every_calendar.as_array().unwrap().len(), 2);

    let groceries = data(&api, "getReminders", json!({ "predicate": "cal-groceries" })).await;
    assert_eq!(groceries.as_array().unwrap().len(), 1);
    assert_eq!(groceries[0]["title"], "Milk");

    let both = data(
        &api,
        "getReminders",
        json!({ "predicate": "cal-groceries, cal-todo" }),
    )
    .await;
    assert_eq!(both.as_array().unwrap().len(), 2);

    assert_eq!(
        error_code(&api, "getReminders", json!({ "predicate": "cal-nope" })).await,
        "invalid_predicate"
    );
    assert_eq!(
        error_code(&api, "getReminders", json!({ "predicate": "cal-todo,," })).await,
        "invalid_predicate"
    );
}

#[tokio::test]
async fn test_incomplete_reminders_by_due_range() {
    let api = api();

    let due_that_week = data(
        &api,
        "getIncompleteReminders",
        json!({ "startDate": date(2024, 1, 1), "endDate": date(2024, 1, 8) }),
    )
    .await;
    assert_eq!(due_that_week.as_array().unwrap().len(), 1);
    assert_eq!(due_that_week[0]["title"], "Milk");
    assert_eq!(
        due_that_week[0]["dueDate"],
        json!({ "year": 2024, "month": 1, "day": 5, "hour": 9, "minute": 30, "second": 0, "millisecond": 0 })
    );
    assert_eq!(due_that_week[0]["completionDate"], Value::Null);

    let later = data(
        &api,
        "getIncompleteReminders",
        json!({ "startDate": date(2024, 2, 1) }),
    )
    .await;
    assert_eq!(later, json!([]));
}

#[tokio::test]
async fn test_completed_reminders() {
    let api = api();

    let completed = data(
        &api,
        "getCompletedReminders",
        json!({ "calendarIdentifiers": ["cal-todo"] }),
    )
    .await;
    assert_eq!(completed.as_array().unwrap().len(), 1);
    assert_eq!(completed[0]["isCompleted"], true);
    assert_eq!(completed[0]["priority"], 1);
    assert_eq!(completed[0]["completionDate"]["hour"], 17);

    let elsewhere = data(
        &api,
        "getCompletedReminders",
        json!({ "calendarIdentifiers": ["cal-groceries"] }),
    )
    .await;
    assert_eq!(elsewhere, json!([]));
}

// ============================================================================
// Framing
// ============================================================================

#[tokio::test]
async fn test_malformed_lines_get_error_responses() {
    let api = api();

    let response: Value = serde_json::from_str(&api.handle_line("{not json").await).unwrap();
    assert_eq!(response["status"], "error");

    let response: Value =
        serde_json::from_str(&api.handle_line(r#"{"command":"formatDisk"}"#).await).unwrap();
    assert_eq!(response["status"], "error");
}

#[tokio::test]
async fn test_missing_params_are_rejected() {
    let api = api();
    assert_eq!(
        error_code(&api, "getEvent", Value::Null).await,
        "invalid_params"
    );
}
