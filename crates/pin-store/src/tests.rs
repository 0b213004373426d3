//! Client Integration Tests
//!
//! Tests for PinStoreClient against the in-memory backend.

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::domain::{BookEntry, Music, Pin, WritingEntry};
    use crate::repository::{MemoryBackend, MemorySessionStore, SessionStore};
    use crate::{PinStoreClient, SignInOutcome};

    fn sample_pin(id: i64, name: &str) -> Pin {
        let mut pin = Pin::new(id, name, 10.0 * id as f64, -5.0 * id as f64);
        pin.intro = format!("notes from [{}](https://example.com/{})", name, id);
        pin.questions = vec!["why here?".to_string()];
        pin
    }

    fn setup(pins: Vec<Pin>) -> (PinStoreClient<MemoryBackend>, Rc<MemorySessionStore>) {
        let sessions = Rc::new(MemorySessionStore::new());
        let backend = MemoryBackend::with_pins(pins);
        backend.add_account("admin@example.com", "hunter2");
        let client = PinStoreClient::new(backend, sessions.clone());
        (client, sessions)
    }

    #[tokio::test]
    async fn test_fetch_orders_by_id() {
        let (client, _) = setup(vec![sample_pin(3, "Tokyo"), sample_pin(1, "Lima"), sample_pin(2, "Oslo")]);

        let pins = client.fetch_pins().await.expect("fetch failed");
        let ids: Vec<_> = pins.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_none() {
        let (client, _) = setup(vec![sample_pin(1, "Lima")]);
        client.backend().set_fail_list(true);

        assert!(client.fetch_pins().await.is_none());
    }

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let (client, _) = setup(vec![sample_pin(1, "Lima")]);

        let mut pin = client.fetch_pin(1).await.unwrap();
        pin.title = "lima, peru".to_string();
        pin.writing = vec![WritingEntry { title: "ceviche".into(), url: "https://example.com/c".into() }];
        pin.read = vec![BookEntry { title: "Conversation in the Cathedral".into(), author: "Vargas Llosa".into() }];
        pin.to_read = vec![BookEntry { title: "The Green House".into(), author: "Vargas Llosa".into() }];
        pin.music = Some(Music { title: "Toro Mata".into(), artist: "Susana Baca".into(), url: String::new() });

        assert!(client.update_pin(&pin).await);

        let read_back = client.fetch_pin(1).await.unwrap();
        assert_eq!(read_back, pin);

        // Storage row carries the renamed field
        let row = client.backend().row(1).unwrap();
        assert_eq!(row.to_read.unwrap()[0].title, "The Green House");
    }

    #[tokio::test]
    async fn test_update_missing_pin_fails() {
        let (client, _) = setup(vec![]);
        assert!(!client.update_pin(&sample_pin(9, "Nowhere")).await);
    }

    #[tokio::test]
    async fn test_batch_update_all_succeed() {
        let (client, _) = setup(vec![sample_pin(1, "Lima"), sample_pin(2, "Oslo")]);
        let mut pins = client.fetch_pins().await.unwrap();
        for pin in &mut pins {
            pin.title = pin.title.to_uppercase();
        }

        assert!(client.update_all_pins(&pins).await);
        assert_eq!(client.fetch_pin(2).await.unwrap().title, "OSLO");
    }

    #[tokio::test]
    async fn test_batch_update_one_failure_fails_all() {
        let (client, _) = setup(vec![sample_pin(1, "Lima"), sample_pin(2, "Oslo"), sample_pin(3, "Pune")]);
        client.backend().fail_updates_for(2);

        let mut pins = client.fetch_pins().await.unwrap();
        for pin in &mut pins {
            pin.intro = "edited".to_string();
        }

        assert!(!client.update_all_pins(&pins).await);
        // No rollback: the other updates were applied
        assert_eq!(client.fetch_pin(1).await.unwrap().intro, "edited");
        assert_eq!(client.fetch_pin(3).await.unwrap().intro, "edited");
        assert_ne!(client.fetch_pin(2).await.unwrap().intro, "edited");
    }

    #[tokio::test]
    async fn test_batch_update_empty_is_success() {
        let (client, _) = setup(vec![]);
        assert!(client.update_all_pins(&[]).await);
    }

    #[tokio::test]
    async fn test_sign_in_and_out() {
        let (client, sessions) = setup(vec![]);

        let outcome = client.sign_in("admin@example.com", "hunter2").await;
        assert!(outcome.is_success());
        let session = client.get_session().await.expect("session after sign-in");
        assert_eq!(session.user.email.as_deref(), Some("admin@example.com"));

        assert!(client.sign_out().await);
        assert!(sessions.load().is_none());
        assert!(client.get_session().await.is_none());
        assert_eq!(client.backend().revoked_tokens(), vec![session.access_token]);
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password_reports_message() {
        let (client, sessions) = setup(vec![]);

        let outcome = client.sign_in("admin@example.com", "wrong").await;
        assert_eq!(outcome, SignInOutcome::Failure("Invalid login credentials".to_string()));
        assert!(sessions.load().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_without_session() {
        let (client, _) = setup(vec![]);
        assert!(client.sign_out().await);
        assert!(client.backend().revoked_tokens().is_empty());
    }

    #[tokio::test]
    async fn test_expired_session_is_refreshed() {
        let (client, _) = setup(vec![]);
        client.backend().set_token_lifetime(-60);
        assert!(client.sign_in("admin@example.com", "hunter2").await.is_success());

        client.backend().set_token_lifetime(3600);
        let session = client.get_session().await.expect("refreshed session");
        assert!(!session.is_expired());
        assert_eq!(session.access_token, "access-2");
    }

    #[tokio::test]
    async fn test_update_refreshes_expired_session() {
        let (client, sessions) = setup(vec![sample_pin(1, "Lima")]);
        client.backend().set_token_lifetime(-60);
        assert!(client.sign_in("admin@example.com", "hunter2").await.is_success());
        client.backend().set_token_lifetime(3600);

        assert!(client.update_pin(&sample_pin(1, "Lima")).await);
        assert_eq!(sessions.load().unwrap().access_token, "access-2");
    }

    #[tokio::test]
    async fn test_batch_update_refreshes_once() {
        let (client, sessions) = setup(vec![sample_pin(1, "Lima"), sample_pin(2, "Oslo"), sample_pin(3, "Pune")]);
        client.backend().set_token_lifetime(-60);
        assert!(client.sign_in("admin@example.com", "hunter2").await.is_success());
        client.backend().set_token_lifetime(3600);

        let pins = client.fetch_pins().await.unwrap();
        assert!(client.update_all_pins(&pins).await);

        // A second refresh would have reused the spent token and dropped the session
        let session = sessions.load().expect("session kept");
        assert_eq!(session.access_token, "access-2");
        assert!(!session.is_expired());
    }

    #[tokio::test]
    async fn test_failed_refresh_clears_session() {
        let (client, sessions) = setup(vec![]);
        client.backend().set_token_lifetime(-60);
        assert!(client.sign_in("admin@example.com", "hunter2").await.is_success());

        // Refresh tokens are single use
        let mut stale = sessions.load().unwrap();
        stale.refresh_token = "refresh-unknown".to_string();
        sessions.save(&stale);

        assert!(client.get_session().await.is_none());
        assert!(sessions.load().is_none());
    }
}
