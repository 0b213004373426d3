//! In-memory backend
//!
//! Keeps storage-side rows in a map so reads and writes go through the same
//! field translation as the hosted backend. Failures can be injected per pin
//! and for listing.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;

use super::traits::{AuthProvider, Repository};
use crate::domain::{Pin, PinRecord, PinUpdate, Session, StoreError, StoreResult, User};

/// Token lifetime handed out by `sign_in_with_password`, in seconds
const DEFAULT_TOKEN_LIFETIME: i64 = 3600;

#[derive(Debug, Default)]
pub struct MemoryBackend {
    rows: RefCell<BTreeMap<i64, PinRecord>>,
    failing_updates: RefCell<HashSet<i64>>,
    fail_list: Cell<bool>,
    /// email -> (password, user)
    accounts: RefCell<HashMap<String, (String, User)>>,
    /// refresh token -> user
    refresh_tokens: RefCell<HashMap<String, User>>,
    token_lifetime: Cell<Option<i64>>,
    issued: Cell<u32>,
    revoked: RefCell<Vec<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with app-side pins, stored as rows
    pub fn with_pins(pins: Vec<Pin>) -> Self {
        let backend = Self::new();
        for pin in &pins {
            backend.insert(pin);
        }
        backend
    }

    pub fn insert(&self, pin: &Pin) {
        let mut record = PinRecord { id: pin.id, ..Default::default() };
        PinUpdate::from(pin).apply_to(&mut record);
        self.rows.borrow_mut().insert(pin.id, record);
    }

    /// Raw storage row, for asserting on storage-side names
    pub fn row(&self, id: i64) -> Option<PinRecord> {
        self.rows.borrow().get(&id).cloned()
    }

    pub fn add_account(&self, email: &str, password: &str) {
        let user = User {
            id: format!("user-{}", self.accounts.borrow().len() + 1),
            email: Some(email.to_string()),
        };
        self.accounts
            .borrow_mut()
            .insert(email.to_string(), (password.to_string(), user));
    }

    pub fn fail_updates_for(&self, id: i64) {
        self.failing_updates.borrow_mut().insert(id);
    }

    pub fn set_fail_list(&self, fail: bool) {
        self.fail_list.set(fail);
    }

    /// Lifetime of issued tokens; negative values issue already-expired sessions
    pub fn set_token_lifetime(&self, seconds: i64) {
        self.token_lifetime.set(Some(seconds));
    }

    /// Access tokens passed to `sign_out`
    pub fn revoked_tokens(&self) -> Vec<String> {
        self.revoked.borrow().clone()
    }

    fn issue(&self, user: User) -> Session {
        let n = self.issued.get() + 1;
        self.issued.set(n);
        let lifetime = self.token_lifetime.get().unwrap_or(DEFAULT_TOKEN_LIFETIME);
        let refresh_token = format!("refresh-{}", n);
        self.refresh_tokens
            .borrow_mut()
            .insert(refresh_token.clone(), user.clone());
        Session {
            access_token: format!("access-{}", n),
            refresh_token,
            expires_at: chrono::Utc::now().timestamp() + lifetime,
            user,
        }
    }
}

#[async_trait(?Send)]
impl Repository<Pin> for MemoryBackend {
    async fn list(&self) -> StoreResult<Vec<Pin>> {
        if self.fail_list.get() {
            return Err(StoreError::Status { status: 503, body: "unavailable".to_string() });
        }
        Ok(self.rows.borrow().values().cloned().map(Pin::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Pin>> {
        Ok(self.rows.borrow().get(&id).cloned().map(Pin::from))
    }

    async fn update(&self, pin: &Pin) -> StoreResult<()> {
        if self.failing_updates.borrow().contains(&pin.id) {
            return Err(StoreError::Status { status: 500, body: format!("update of {} rejected", pin.id) });
        }
        let mut rows = self.rows.borrow_mut();
        let record = rows
            .get_mut(&pin.id)
            .ok_or_else(|| StoreError::NotFound(pin.id.to_string()))?;
        PinUpdate::from(pin).apply_to(record);
        Ok(())
    }
}

#[async_trait(?Send)]
impl AuthProvider for MemoryBackend {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> StoreResult<Session> {
        let user = match self.accounts.borrow().get(email) {
            Some((expected, user)) if expected == password => user.clone(),
            _ => return Err(StoreError::Auth("Invalid login credentials".to_string())),
        };
        Ok(self.issue(user))
    }

    async fn refresh_session(&self, refresh_token: &str) -> StoreResult<Session> {
        let user = self
            .refresh_tokens
            .borrow_mut()
            .remove(refresh_token)
            .ok_or_else(|| StoreError::Auth("Invalid Refresh Token".to_string()))?;
        Ok(self.issue(user))
    }

    async fn sign_out(&self, access_token: &str) -> StoreResult<()> {
        self.revoked.borrow_mut().push(access_token.to_string());
        Ok(())
    }
}
