//! Enum mappings between host and wire values.
//!
//! Host values outside the known set map to the wire default for that
//! enum.

use crate::native::{NativeAuthorizationStatus, NativeAvailability, NativeEventStatus, NativeFrequency};
use crate::record::{AuthorizationStatus, EventAvailability, EventStatus, RecurrenceFrequency};

impl From<NativeAuthorizationStatus> for AuthorizationStatus {
    fn from(status: NativeAuthorizationStatus) -> Self {
        match status {
            NativeAuthorizationStatus::NotDetermined => Self::NotDetermined,
            NativeAuthorizationStatus::Restricted => Self::Restricted,
            NativeAuthorizationStatus::Denied => Self::Denied,
            NativeAuthorizationStatus::FullAccess => Self::Authorized,
            // Write-only grants cannot read anything back.
            NativeAuthorizationStatus::WriteOnly | NativeAuthorizationStatus::Unknown(_) => {
                Self::NotDetermined
            }
        }
    }
}

impl From<NativeAvailability> for EventAvailability {
    fn from(availability: NativeAvailability) -> Self {
        match availability {
            NativeAvailability::NotSupported | NativeAvailability::Unknown(_) => Self::NotSupported,
            NativeAvailability::Busy => Self::Busy,
            NativeAvailability::Free => Self::Free,
            NativeAvailability::Tentative => Self::Tentative,
            NativeAvailability::Unavailable => Self::Unavailable,
        }
    }
}

impl From<EventAvailability> for NativeAvailability {
    fn from(availability: EventAvailability) -> Self {
        match availability {
            EventAvailability::NotSupported => Self::NotSupported,
            EventAvailability::Busy => Self::Busy,
            EventAvailability::Free => Self::Free,
            EventAvailability::Tentative => Self::Tentative,
            EventAvailability::Unavailable => Self::Unavailable,
        }
    }
}

impl From<NativeEventStatus> for EventStatus {
    fn from(status: NativeEventStatus) -> Self {
        match status {
            NativeEventStatus::None | NativeEventStatus::Unknown(_) => Self::None,
            NativeEventStatus::Confirmed => Self::Confirmed,
            NativeEventStatus::Tentative => Self::Tentative,
            NativeEventStatus::Canceled => Self::Canceled,
        }
    }
}

impl From<NativeFrequency> for RecurrenceFrequency {
    fn from(frequency: NativeFrequency) -> Self {
        match frequency {
            NativeFrequency::Daily | NativeFrequency::Unknown(_) => Self::Daily,
            NativeFrequency::Weekly => Self::Weekly,
            NativeFrequency::Monthly => Self::Monthly,
            NativeFrequency::Yearly => Self::Yearly,
        }
    }
}
