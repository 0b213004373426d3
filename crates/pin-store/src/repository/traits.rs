//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data and auth access.
//! Implementations can use the hosted service, in-memory maps, etc.
//!
//! Browser futures are not `Send`, so the async traits are `?Send`.

use async_trait::async_trait;
use crate::domain::{Entity, Session, StoreResult};

/// Read/update access to one table
#[async_trait(?Send)]
pub trait Repository<T: Entity> {
    /// List all entities ordered by ID
    async fn list(&self) -> StoreResult<Vec<T>>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> StoreResult<Option<T>>;

    /// Overwrite the full field set of an existing entity
    async fn update(&self, entity: &T) -> StoreResult<()>;
}

/// Email/password auth
#[async_trait(?Send)]
pub trait AuthProvider {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> StoreResult<Session>;

    /// Exchange a refresh token for a new session
    async fn refresh_session(&self, refresh_token: &str) -> StoreResult<Session>;

    /// Revoke the session behind `access_token`
    async fn sign_out(&self, access_token: &str) -> StoreResult<()>;
}

/// Where the current session lives between page loads
pub trait SessionStore {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: &Session);
    fn clear(&self);
}
