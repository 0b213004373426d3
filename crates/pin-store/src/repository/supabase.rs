//! Supabase backend
//!
//! PostgREST for the `pins` table and GoTrue for email/password auth, over
//! reqwest. Requests carry the anon key as `apikey`; the bearer token is the
//! signed-in session's access token, or the anon key when signed out or when
//! the stored session has expired.

use std::rc::Rc;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use super::traits::{AuthProvider, Repository, SessionStore};
use crate::config::StoreConfig;
use crate::domain::{Pin, PinRecord, PinUpdate, Session, StoreError, StoreResult, User};

const PINS_TABLE: &str = "pins";

pub(crate) fn pins_list_url(base: &str) -> String {
    format!("{}/rest/v1/{}?select=*&order=id.asc", base, PINS_TABLE)
}

pub(crate) fn pin_by_id_url(base: &str, id: i64) -> String {
    format!("{}/rest/v1/{}?id=eq.{}", base, PINS_TABLE, id)
}

pub(crate) fn token_url(base: &str, grant_type: &str) -> String {
    format!("{}/auth/v1/token?grant_type={}", base, grant_type)
}

pub(crate) fn logout_url(base: &str) -> String {
    format!("{}/auth/v1/logout", base)
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    #[serde(default)]
    expires_at: Option<i64>,
    user: User,
}

impl TokenResponse {
    pub(crate) fn into_session(self, now: i64) -> Session {
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self.expires_at.unwrap_or(now + self.expires_in),
            user: self.user,
        }
    }
}

/// GoTrue has used all three field names for its error text
#[derive(Debug, Default, Deserialize)]
struct AuthErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

/// Error for a non-success PostgREST response
pub(crate) fn status_error(status: u16, body: String) -> StoreError {
    match status {
        401 | 403 => {
            log::warn!("request rejected ({}): {}", status, body);
            StoreError::Unauthorized
        }
        _ => StoreError::Status { status, body },
    }
}

pub(crate) fn auth_error_message(body: &str) -> String {
    let parsed: AuthErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .error_description
        .or(parsed.msg)
        .or(parsed.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "Invalid credentials".to_string())
}

pub struct SupabaseBackend {
    config: StoreConfig,
    http: reqwest::Client,
    sessions: Rc<dyn SessionStore>,
}

impl SupabaseBackend {
    pub fn new(config: StoreConfig, sessions: Rc<dyn SessionStore>) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            sessions,
        }
    }

    /// An expired token would get every request rejected, even anon-readable ones
    pub(crate) fn bearer(&self) -> String {
        self.sessions
            .load()
            .filter(|s| !s.is_expired())
            .map(|s| s.access_token)
            .unwrap_or_else(|| self.config.anon_key.clone())
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(self.bearer())
    }

    async fn check(response: Response) -> StoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(status_error(status.as_u16(), body))
    }

    async fn token_request<B: Serialize>(&self, grant_type: &str, body: &B) -> StoreResult<Session> {
        let response = self
            .http
            .post(token_url(&self.config.url, grant_type))
            .header("apikey", &self.config.anon_key)
            .json(body)
            .send()
            .await?;
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Auth(auth_error_message(&body)));
        }
        let token: TokenResponse = response.json().await?;
        Ok(token.into_session(chrono::Utc::now().timestamp()))
    }
}

#[async_trait(?Send)]
impl Repository<Pin> for SupabaseBackend {
    async fn list(&self) -> StoreResult<Vec<Pin>> {
        let response = self
            .request(Method::GET, &pins_list_url(&self.config.url))
            .send()
            .await?;
        let records: Vec<PinRecord> = Self::check(response).await?.json().await?;
        log::debug!("fetched {} pins", records.len());
        Ok(records.into_iter().map(Pin::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Pin>> {
        let response = self
            .request(Method::GET, &pin_by_id_url(&self.config.url, id))
            .send()
            .await?;
        let records: Vec<PinRecord> = Self::check(response).await?.json().await?;
        Ok(records.into_iter().next().map(Pin::from))
    }

    async fn update(&self, pin: &Pin) -> StoreResult<()> {
        let response = self
            .request(Method::PATCH, &pin_by_id_url(&self.config.url, pin.id))
            .header("Prefer", "return=representation")
            .json(&PinUpdate::from(pin))
            .send()
            .await?;
        let updated: Vec<PinRecord> = Self::check(response).await?.json().await?;
        // Row-level security hides rows instead of rejecting the write
        if updated.is_empty() {
            return Err(StoreError::NotFound(pin.id.to_string()));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl AuthProvider for SupabaseBackend {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> StoreResult<Session> {
        self.token_request("password", &PasswordGrant { email, password }).await
    }

    async fn refresh_session(&self, refresh_token: &str) -> StoreResult<Session> {
        self.token_request("refresh_token", &RefreshGrant { refresh_token }).await
    }

    async fn sign_out(&self, access_token: &str) -> StoreResult<()> {
        let response = self
            .http
            .post(logout_url(&self.config.url))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        // An already-revoked token still counts as signed out
        if response.status().as_u16() == 401 || response.status().as_u16() == 404 {
            return Ok(());
        }
        Self::check(response).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemorySessionStore;

    const BASE: &str = "https://demo.supabase.co";

    fn backend_with(expires_at: Option<i64>) -> SupabaseBackend {
        let sessions = Rc::new(MemorySessionStore::new());
        if let Some(expires_at) = expires_at {
            sessions.save(&Session {
                access_token: "user-jwt".into(),
                refresh_token: "r".into(),
                expires_at,
                user: User { id: "u1".into(), email: None },
            });
        }
        let config = StoreConfig::new(BASE, "anon").unwrap();
        SupabaseBackend::new(config, sessions)
    }

    #[test]
    fn test_bearer_uses_live_session() {
        let in_an_hour = chrono::Utc::now().timestamp() + 3600;
        assert_eq!(backend_with(Some(in_an_hour)).bearer(), "user-jwt");
    }

    #[test]
    fn test_bearer_falls_back_to_anon_key() {
        assert_eq!(backend_with(None).bearer(), "anon");
        // Expired session left behind by an admin who never logged out
        assert_eq!(backend_with(Some(1)).bearer(), "anon");
    }

    #[test]
    fn test_rejected_requests_are_unauthorized() {
        assert_eq!(status_error(401, "JWT expired".into()), StoreError::Unauthorized);
        assert_eq!(status_error(403, String::new()), StoreError::Unauthorized);
        assert_eq!(
            status_error(503, "down".into()),
            StoreError::Status { status: 503, body: "down".into() }
        );
    }

    #[test]
    fn test_urls() {
        assert_eq!(
            pins_list_url(BASE),
            "https://demo.supabase.co/rest/v1/pins?select=*&order=id.asc"
        );
        assert_eq!(pin_by_id_url(BASE, 7), "https://demo.supabase.co/rest/v1/pins?id=eq.7");
        assert_eq!(
            token_url(BASE, "password"),
            "https://demo.supabase.co/auth/v1/token?grant_type=password"
        );
        assert_eq!(logout_url(BASE), "https://demo.supabase.co/auth/v1/logout");
    }

    #[test]
    fn test_auth_error_message_variants() {
        assert_eq!(
            auth_error_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(
            auth_error_message(r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(auth_error_message("<html>bad gateway</html>"), "Invalid credentials");
    }

    #[test]
    fn test_token_response_expiry() {
        let token: TokenResponse = serde_json::from_str(
            r#"{"access_token":"a","token_type":"bearer","expires_in":3600,"refresh_token":"r",
                "user":{"id":"u1","email":"me@example.com","role":"authenticated"}}"#,
        )
        .unwrap();
        let session = token.into_session(1_000);
        assert_eq!(session.expires_at, 4_600);
        assert_eq!(session.user.email.as_deref(), Some("me@example.com"));
    }
}
