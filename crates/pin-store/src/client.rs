//! Pin Store Client
//!
//! The surface the UI talks to. Every failure is logged here and collapsed to
//! a sentinel: `None` for reads, `false` for writes, `SignInOutcome::Failure`
//! for sign-in. Callers never see a `StoreError`.

use std::rc::Rc;

use futures::future::join_all;

use crate::domain::{Pin, Session, SignInOutcome};
use crate::repository::{AuthProvider, Repository, SessionStore};

pub struct PinStoreClient<B> {
    backend: Rc<B>,
    sessions: Rc<dyn SessionStore>,
}

impl<B> Clone for PinStoreClient<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Rc::clone(&self.backend),
            sessions: Rc::clone(&self.sessions),
        }
    }
}

impl<B> PinStoreClient<B>
where
    B: Repository<Pin> + AuthProvider,
{
    /// `sessions` must be the same store the backend reads its bearer token from
    pub fn new(backend: B, sessions: Rc<dyn SessionStore>) -> Self {
        Self {
            backend: Rc::new(backend),
            sessions,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// All pins ordered by ID
    pub async fn fetch_pins(&self) -> Option<Vec<Pin>> {
        match self.backend.list().await {
            Ok(pins) => Some(pins),
            Err(e) => {
                log::error!("Error fetching pins: {}", e);
                None
            }
        }
    }

    pub async fn fetch_pin(&self, id: i64) -> Option<Pin> {
        match self.backend.find_by_id(id).await {
            Ok(pin) => pin,
            Err(e) => {
                log::error!("Error fetching pin {}: {}", id, e);
                None
            }
        }
    }

    pub async fn update_pin(&self, pin: &Pin) -> bool {
        self.get_session().await;
        self.write_pin(pin).await
    }

    /// Update every pin concurrently; true only if all updates succeed.
    /// Nothing is rolled back when some of them fail.
    pub async fn update_all_pins(&self, pins: &[Pin]) -> bool {
        // Refresh tokens are single use, so refresh once before fanning out
        self.get_session().await;
        let results = join_all(pins.iter().map(|pin| self.write_pin(pin))).await;
        let failed = results.iter().filter(|ok| !**ok).count();
        if failed > 0 {
            log::warn!("{} of {} pin updates failed", failed, pins.len());
        }
        failed == 0
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> SignInOutcome {
        match self.backend.sign_in_with_password(email, password).await {
            Ok(session) => {
                log::info!("signed in as {}", session.user.email.as_deref().unwrap_or(&session.user.id));
                let user = session.user.clone();
                self.sessions.save(&session);
                SignInOutcome::Success(user)
            }
            Err(e) => {
                log::warn!("sign-in failed: {}", e);
                SignInOutcome::Failure(e.to_string())
            }
        }
    }

    /// The local session is dropped even if revoking it remotely fails
    pub async fn sign_out(&self) -> bool {
        let Some(session) = self.sessions.load() else {
            return true;
        };
        self.sessions.clear();
        match self.backend.sign_out(&session.access_token).await {
            Ok(()) => true,
            Err(e) => {
                log::error!("Error signing out: {}", e);
                false
            }
        }
    }

    /// Current session, refreshed once if it has expired
    pub async fn get_session(&self) -> Option<Session> {
        let session = self.sessions.load()?;
        if !session.is_expired() {
            return Some(session);
        }
        match self.backend.refresh_session(&session.refresh_token).await {
            Ok(fresh) => {
                self.sessions.save(&fresh);
                Some(fresh)
            }
            Err(e) => {
                log::warn!("session refresh failed: {}", e);
                self.sessions.clear();
                None
            }
        }
    }

    async fn write_pin(&self, pin: &Pin) -> bool {
        match self.backend.update(pin).await {
            Ok(()) => true,
            Err(e) => {
                log::error!("Error updating pin {}: {}", pin.id, e);
                false
            }
        }
    }
}
