//! Host enums, carried by their raw integer values.
//!
//! Each enum has an `Unknown` arm so a value introduced by a newer host
//! version survives the trip into the bridge instead of failing it.

use serde::{Deserialize, Serialize};

/// Host permission grant level for one entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum NativeAuthorizationStatus {
    #[default]
    NotDetermined,
    Restricted,
    Denied,
    /// Called `authorized` before hosts split full and write-only access.
    FullAccess,
    WriteOnly,
    Unknown(i64),
}

impl From<i64> for NativeAuthorizationStatus {
    fn from(raw: i64) -> Self {
        match raw {
            0 => Self::NotDetermined,
            1 => Self::Restricted,
            2 => Self::Denied,
            3 => Self::FullAccess,
            4 => Self::WriteOnly,
            other => Self::Unknown(other),
        }
    }
}

impl From<NativeAuthorizationStatus> for i64 {
    fn from(status: NativeAuthorizationStatus) -> Self {
        match status {
            NativeAuthorizationStatus::NotDetermined => 0,
            NativeAuthorizationStatus::Restricted => 1,
            NativeAuthorizationStatus::Denied => 2,
            NativeAuthorizationStatus::FullAccess => 3,
            NativeAuthorizationStatus::WriteOnly => 4,
            NativeAuthorizationStatus::Unknown(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum NativeAvailability {
    #[default]
    NotSupported,
    Busy,
    Free,
    Tentative,
    Unavailable,
    Unknown(i64),
}

impl From<i64> for NativeAvailability {
    fn from(raw: i64) -> Self {
        match raw {
            -1 => Self::NotSupported,
            0 => Self::Busy,
            1 => Self::Free,
            2 => Self::Tentative,
            3 => Self::Unavailable,
            other => Self::Unknown(other),
        }
    }
}

impl From<NativeAvailability> for i64 {
    fn from(availability: NativeAvailability) -> Self {
        match availability {
            NativeAvailability::NotSupported => -1,
            NativeAvailability::Busy => 0,
            NativeAvailability::Free => 1,
            NativeAvailability::Tentative => 2,
            NativeAvailability::Unavailable => 3,
            NativeAvailability::Unknown(raw) => raw,
        }
    }
}

/// Event status. Computed by the host; read-only to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum NativeEventStatus {
    #[default]
    None,
    Confirmed,
    Tentative,
    Canceled,
    Unknown(i64),
}

impl From<i64> for NativeEventStatus {
    fn from(raw: i64) -> Self {
        match raw {
            0 => Self::None,
            1 => Self::Confirmed,
            2 => Self::Tentative,
            3 => Self::Canceled,
            other => Self::Unknown(other),
        }
    }
}

impl From<NativeEventStatus> for i64 {
    fn from(status: NativeEventStatus) -> Self {
        match status {
            NativeEventStatus::None => 0,
            NativeEventStatus::Confirmed => 1,
            NativeEventStatus::Tentative => 2,
            NativeEventStatus::Canceled => 3,
            NativeEventStatus::Unknown(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum NativeFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Unknown(i64),
}

impl From<i64> for NativeFrequency {
    fn from(raw: i64) -> Self {
        match raw {
            0 => Self::Daily,
            1 => Self::Weekly,
            2 => Self::Monthly,
            3 => Self::Yearly,
            other => Self::Unknown(other),
        }
    }
}

impl From<NativeFrequency> for i64 {
    fn from(frequency: NativeFrequency) -> Self {
        match frequency {
            NativeFrequency::Daily => 0,
            NativeFrequency::Weekly => 1,
            NativeFrequency::Monthly => 2,
            NativeFrequency::Yearly => 3,
            NativeFrequency::Unknown(raw) => raw,
        }
    }
}
