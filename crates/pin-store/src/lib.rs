//! Pin Store
//!
//! Layered access to the hosted pin table and admin auth:
//! - domain: pins, sessions, errors
//! - repository: backend traits plus the Supabase and in-memory backends
//! - client: sentinel-returning facade used by the UI

mod config;
mod client;
pub mod domain;
pub mod repository;

#[cfg(test)]
mod tests;

pub use client::PinStoreClient;
pub use config::{ConfigError, StoreConfig};
pub use domain::{BookEntry, Music, Pin, Session, SignInOutcome, StoreError, User, WritingEntry};
pub use repository::{MemoryBackend, MemorySessionStore, SessionStore, SupabaseBackend};
