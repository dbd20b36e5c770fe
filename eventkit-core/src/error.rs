//! Error types for the eventkit bridge.

use thiserror::Error;

use crate::store::EntityType;

/// Failures reported by the host calendar store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Access to {0} data has not been granted")]
    AccessDenied(EntityType),

    #[error("No calendar has been set")]
    NoCalendar,

    #[error("Calendar '{0}' does not allow content modifications")]
    ReadOnlyCalendar(String),

    #[error("Calendar '{calendar}' does not accept {entity} items")]
    WrongEntityType { calendar: String, entity: EntityType },

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias for host store calls.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced at the request boundary.
///
/// Permission denial and not-found lookups are not errors; they travel as
/// `false` / `None` values in the response.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Invalid params: {0}")]
    InvalidParams(#[from] serde_json::Error),

    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),

    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid reminder predicate: {0}")]
    InvalidPredicate(String),

    #[error("Failed to save event: {0}")]
    EventSave(#[source] StoreError),

    #[error("Failed to remove event: {0}")]
    EventRemove(#[source] StoreError),

    #[error("Failed to save reminder: {0}")]
    ReminderSave(#[source] StoreError),

    #[error("Failed to remove reminder: {0}")]
    ReminderRemove(#[source] StoreError),
}

impl BridgeError {
    /// Stable machine-readable kind, sent alongside the message in error responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidParams(_) => "invalid_params",
            Self::InvalidDateTime(_) => "invalid_date_time",
            Self::InvalidUrl { .. } => "invalid_url",
            Self::InvalidPredicate(_) => "invalid_predicate",
            Self::EventSave(_) => "event_save_failed",
            Self::EventRemove(_) => "event_remove_failed",
            Self::ReminderSave(_) => "reminder_save_failed",
            Self::ReminderRemove(_) => "reminder_remove_failed",
        }
    }
}

/// Result type alias for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
