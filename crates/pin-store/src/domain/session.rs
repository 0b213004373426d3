//! Auth Session
//!
//! Tokens issued by the auth service for a signed-in admin.

use serde::{Deserialize, Serialize};

/// A session this close to its expiry is treated as expired
pub const EXPIRY_MARGIN_SECS: i64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// A signed-in session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix seconds
    pub expires_at: i64,
    pub user: User,
}

impl Session {
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at - EXPIRY_MARGIN_SECS <= now
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(chrono::Utc::now().timestamp())
    }
}

/// Result of a password sign-in
#[derive(Debug, Clone, PartialEq)]
pub enum SignInOutcome {
    Success(User),
    /// Message from the auth service, suitable for showing on the form
    Failure(String),
}

impl SignInOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SignInOutcome::Success(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SignInOutcome::Success(_) => None,
            SignInOutcome::Failure(msg) => Some(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_boundary() {
        let session = Session {
            access_token: "a".into(),
            refresh_token: "r".into(),
            expires_at: 100,
            user: User { id: "u".into(), email: None },
        };
        assert!(!session.is_expired_at(100 - EXPIRY_MARGIN_SECS - 1));
        assert!(session.is_expired_at(100 - EXPIRY_MARGIN_SECS));
        assert!(session.is_expired_at(100));
    }

    #[test]
    fn test_outcome_message() {
        assert_eq!(SignInOutcome::Failure("nope".into()).error_message(), Some("nope"));
        assert!(SignInOutcome::Success(User { id: "u".into(), email: None }).is_success());
    }
}
