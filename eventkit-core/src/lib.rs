//! Core of the eventkit bridge.
//!
//! This crate holds everything between the message transport and the host
//! calendar store:
//! - `record` - flat, wire-safe records exchanged with the external caller
//! - `native` - the host store's own representation of calendars, events and reminders
//! - `store` - the `HostStore` trait the host calendar service is reached through
//! - `adapter` - the Store Adapter, one host call per logical operation
//! - `convert` - the Model Translator between native and wire records
//! - `protocol` / `api` - command types and the request dispatcher
//! - `memory` - an in-process `HostStore` used by the bridge binary and tests

pub mod adapter;
pub mod api;
pub mod convert;
pub mod error;
pub mod memory;
pub mod native;
pub mod protocol;
pub mod record;
pub mod store;
pub mod zone;

pub use adapter::{Capabilities, StoreAdapter};
pub use api::HostApi;
pub use error::{BridgeError, BridgeResult, StoreError, StoreResult};
pub use memory::MemoryStore;
pub use store::{EntityType, HostStore};
pub use zone::HostTimeZone;
