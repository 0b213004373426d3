//! Admin Editing State
//!
//! Uses Leptos reactive_stores for fine-grained reactivity: the sidebar only
//! tracks `pins`, the save button only tracks `save`.

use leptos::prelude::*;
use pin_store::Pin;
use reactive_stores::Store;

use crate::edit::PinEdit;

/// Progress of the "save changes" button
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Saved,
}

impl SaveStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SaveStatus::Idle => "save changes",
            SaveStatus::Saving => "saving...",
            SaveStatus::Saved => "✓ saved",
        }
    }
}

/// Admin panel state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AdminState {
    /// Local working copy of every pin, edited in place until saved
    pub pins: Vec<Pin>,
    /// Pin open in the editor
    pub selected: Option<i64>,
    pub save: SaveStatus,
    /// Inline message: failed login or failed save
    pub error: Option<String>,
}

/// Type alias for the store
pub type AdminStore = Store<AdminState>;

/// Get the admin store from context
pub fn use_admin_store() -> AdminStore {
    expect_context::<AdminStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the working copy; keeps the selection if the pin still exists
pub fn store_set_pins(store: &AdminStore, pins: Vec<Pin>) {
    let selected = store.selected().get_untracked();
    if let Some(id) = selected {
        if !pins.iter().any(|p| p.id == id) {
            store.selected().set(None);
        }
    }
    store.pins().set(pins);
}

/// Apply one editor change to the pin with the given ID
pub fn store_apply_edit(store: &AdminStore, pin_id: i64, edit: PinEdit) {
    if let Some(pin) = store.pins().write().iter_mut().find(|p| p.id == pin_id) {
        edit.apply(pin);
    }
}

/// A pin from the working copy, so edits show immediately
pub fn store_find_pin(store: &AdminStore, pin_id: i64) -> Option<Pin> {
    store.pins().read().iter().find(|p| p.id == pin_id).cloned()
}

/// Message shown on the login form for a failed sign-in
pub fn login_error_message(message: &str) -> String {
    let message = message.trim();
    if message.is_empty() {
        "Invalid credentials".to_string()
    } else {
        message.to_string()
    }
}

/// Drop everything on sign-out
pub fn store_reset(store: &AdminStore) {
    store.pins().set(Vec::new());
    store.selected().set(None);
    store.save().set(SaveStatus::Idle);
    store.error().set(None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::PinEdit;

    fn store_with(pins: Vec<Pin>) -> AdminStore {
        let store = Store::new(AdminState::default());
        store_set_pins(&store, pins);
        store
    }

    #[test]
    fn test_edit_changes_only_target_pin() {
        let owner = Owner::new();
        owner.set();
        let store = store_with(vec![Pin::new(1, "Lima", 0.0, 0.0), Pin::new(2, "Oslo", 0.0, 0.0)]);
        store_apply_edit(&store, 2, PinEdit::Title("oslo, norway".into()));
        assert_eq!(store_find_pin(&store, 2).map(|p| p.title), Some("oslo, norway".to_string()));
        assert_eq!(store.pins().read()[0].title, "Lima");
    }

    #[test]
    fn test_reload_drops_vanished_selection() {
        let owner = Owner::new();
        owner.set();
        let store = store_with(vec![Pin::new(1, "Lima", 0.0, 0.0)]);
        store.selected().set(Some(1));

        store_set_pins(&store, vec![Pin::new(3, "Pune", 0.0, 0.0)]);
        assert_eq!(store.selected().get_untracked(), None);
        assert!(store_find_pin(&store, 1).is_none());
    }

    #[test]
    fn test_reset_and_labels() {
        let owner = Owner::new();
        owner.set();
        let store = store_with(vec![Pin::new(1, "Lima", 0.0, 0.0)]);
        store.save().set(SaveStatus::Saved);
        store.error().set(Some("Failed to save changes".into()));

        store_reset(&store);
        assert!(store.pins().read().is_empty());
        assert_eq!(store.save().get_untracked(), SaveStatus::Idle);
        assert_eq!(SaveStatus::Saving.label(), "saving...");
        assert_eq!(SaveStatus::Saved.label(), "✓ saved");
    }

    #[test]
    fn test_login_error_fallback() {
        assert_eq!(login_error_message("Invalid login credentials"), "Invalid login credentials");
        assert_eq!(login_error_message("  "), "Invalid credentials");
    }
}
