//! Domain Layer
//!
//! Pins, sessions and the error type shared by every backend.
//! This layer has NO network dependencies (only serde, chrono and thiserror).

mod entity;
mod pin;
mod session;

pub use entity::{Entity, StoreError, StoreResult};
pub use pin::{BookEntry, Music, Pin, PinRecord, PinUpdate, WritingEntry};
pub use session::{SignInOutcome, Session, User};
