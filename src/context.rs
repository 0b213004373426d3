//! Application Context
//!
//! The store client, built once at startup and provided via Leptos Context
//! API. The client is `!Send` (Rc inside), so it lives in local storage of
//! the reactive arena.

use leptos::prelude::*;
use pin_store::{Pin, Session, SignInOutcome};

use crate::client::SiteClient;

/// Shown on the login form when the build has no store configuration
const NOT_CONFIGURED: &str = "Sign-in is not configured";

#[derive(Clone, Copy)]
pub struct StoreContext {
    client: StoredValue<Option<SiteClient>, LocalStorage>,
}

impl StoreContext {
    pub fn new(client: Option<SiteClient>) -> Self {
        Self {
            client: StoredValue::new_local(client),
        }
    }

    fn client(&self) -> Option<SiteClient> {
        self.client.try_with_value(|c| c.clone()).flatten()
    }

    /// All pins, or `None` on failure (the caller keeps what it has)
    pub async fn fetch_pins(self) -> Option<Vec<Pin>> {
        self.client()?.fetch_pins().await
    }

    pub async fn update_all_pins(self, pins: Vec<Pin>) -> bool {
        match self.client() {
            Some(client) => client.update_all_pins(&pins).await,
            None => false,
        }
    }

    pub async fn sign_in(self, email: String, password: String) -> SignInOutcome {
        match self.client() {
            Some(client) => client.sign_in(&email, &password).await,
            None => SignInOutcome::Failure(NOT_CONFIGURED.to_string()),
        }
    }

    pub async fn sign_out(self) -> bool {
        match self.client() {
            Some(client) => client.sign_out().await,
            None => true,
        }
    }

    pub async fn get_session(self) -> Option<Session> {
        self.client()?.get_session().await
    }
}

/// Get the store context
pub fn use_store_context() -> StoreContext {
    expect_context::<StoreContext>()
}
