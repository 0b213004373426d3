//! Log Panel Component
//!
//! Newest warnings and errors from the in-memory log buffer.

use leptos::prelude::*;
use log::Level;

use crate::store::{use_admin_store, AdminStateStoreFields};
use crate::APP_NAME;

/// Entries shown, newest first
const SHOWN: usize = 8;

#[component]
pub fn LogPanel() -> impl IntoView {
    let store = use_admin_store();

    // Re-read the buffer whenever a save or sign-in settles
    let entries = move || {
        store.save().track();
        store.error().track();
        console_logger::recent_entries(Level::Warn)
    };

    view! {
        <div class="admin-log">
            <h3>"recent problems"</h3>
            {move || {
                let entries = entries();
                if entries.is_empty() {
                    view! { <p class="admin-log-empty">"none"</p> }.into_any()
                } else {
                    view! {
                        <ul class="admin-log-list">
                            {entries.iter().rev().take(SHOWN).map(|e| view! {
                                <li class=format!("log-{}", e.level.as_str().to_lowercase())>{e.line(APP_NAME)}</li>
                            }).collect_view()}
                        </ul>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
