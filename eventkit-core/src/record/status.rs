//! Wire enums.
//!
//! Each enum ends with a fallback variant marked `#[serde(other)]`: a value
//! sent by a newer caller decodes to the documented default instead of
//! failing the whole request.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthorizationStatus {
    Restricted,
    Denied,
    Authorized,
    #[default]
    #[serde(other)]
    NotDetermined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventAvailability {
    Busy,
    Free,
    Tentative,
    Unavailable,
    #[default]
    #[serde(other)]
    NotSupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventStatus {
    Confirmed,
    Tentative,
    Canceled,
    #[default]
    #[serde(other)]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecurrenceFrequency {
    Weekly,
    Monthly,
    Yearly,
    #[default]
    #[serde(other)]
    Daily,
}
