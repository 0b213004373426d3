//! Admin Page Component
//!
//! Session check, login and the pin editor with its save/logout actions.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::app::navigate_to;
use crate::components::{LogPanel, LoginForm, PinEditor};
use crate::context::use_store_context;
use crate::store::{store_reset, store_set_pins, AdminState, AdminStateStoreFields, AdminStore, SaveStatus};
use crate::timers::ScheduledTasks;

const SAVED_MS: u32 = 2_000;
const SAVE_ERROR_MS: u32 = 3_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthView {
    Loading,
    SignedOut,
    SignedIn,
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let ctx = use_store_context();
    let store: AdminStore = Store::new(AdminState::default());
    provide_context(store);

    let (auth, set_auth) = signal(AuthView::Loading);
    let tasks = StoredValue::new_local(ScheduledTasks::new());
    on_cleanup(move || {
        tasks.try_update_value(|t| t.clear());
    });

    // Status messages reset themselves after a while
    let reset_after = move |ms: u32, reset: fn(&AdminStore)| {
        let timeout = Timeout::new(ms, move || reset(&store));
        tasks.try_update_value(|t| t.set_timeout(timeout));
    };

    let load_pins = move || {
        spawn_local(async move {
            if let Some(pins) = ctx.fetch_pins().await {
                store_set_pins(&store, pins);
            }
        });
    };

    spawn_local(async move {
        if ctx.get_session().await.is_some() {
            set_auth.set(AuthView::SignedIn);
            load_pins();
        } else {
            set_auth.set(AuthView::SignedOut);
        }
    });

    let on_signed_in = Callback::new(move |_: ()| {
        store.error().set(None);
        set_auth.set(AuthView::SignedIn);
        load_pins();
    });

    let save = move |_| {
        if store.save().get_untracked() == SaveStatus::Saving {
            return;
        }
        store.save().set(SaveStatus::Saving);
        store.error().set(None);
        let pins = store.pins().get_untracked();
        spawn_local(async move {
            if ctx.update_all_pins(pins).await {
                store.save().set(SaveStatus::Saved);
                reset_after(SAVED_MS, |s| s.save().set(SaveStatus::Idle));
            } else {
                store.save().set(SaveStatus::Idle);
                store.error().set(Some("Failed to save changes".to_string()));
                reset_after(SAVE_ERROR_MS, |s| s.error().set(None));
            }
        });
    };

    let logout = move |_| {
        spawn_local(async move {
            if !ctx.sign_out().await {
                log::warn!("sign-out was not confirmed by the server");
            }
            store_reset(&store);
            set_auth.set(AuthView::SignedOut);
            navigate_to("/");
        });
    };

    let panel = move || {
        view! {
            <div class="admin-panel">
                <div class="admin-header">
                    <h1>"admin panel"</h1>
                    <div class="admin-actions">
                        {move || store.error().get().map(|e| view! { <span class="admin-error">{e}</span> })}
                        <button
                            on:click=save
                            class=move || if store.save().get() == SaveStatus::Saved { "saved" } else { "" }
                            disabled=move || store.save().get() == SaveStatus::Saving
                        >
                            {move || store.save().get().label()}
                        </button>
                        <button on:click=logout class="logout">"logout"</button>
                    </div>
                </div>

                <div class="admin-content">
                    <div class="admin-sidebar">
                        <h3>"regions"</h3>
                        <For
                            each=move || store.pins().get()
                            key=|pin| (pin.id, pin.title.clone())
                            children=move |pin| {
                                let id = pin.id;
                                view! {
                                    <button
                                        class=move || {
                                            if store.selected().get() == Some(id) {
                                                "admin-region-btn active"
                                            } else {
                                                "admin-region-btn"
                                            }
                                        }
                                        on:click=move |_| store.selected().set(Some(id))
                                    >
                                        {pin.title}
                                    </button>
                                }
                            }
                        />
                        <LogPanel />
                    </div>

                    <div class="admin-editor">
                        {move || match store.selected().get() {
                            Some(id) => view! { <PinEditor id=id /> }.into_any(),
                            None => view! {
                                <div class="admin-empty">
                                    <p>"Select a region to edit"</p>
                                </div>
                            }
                            .into_any(),
                        }}
                    </div>
                </div>
            </div>
        }
    };

    view! {
        {move || match auth.get() {
            AuthView::Loading => view! {
                <div class="admin-login">
                    <div class="admin-login-form">
                        <h1>"loading..."</h1>
                    </div>
                </div>
            }
            .into_any(),
            AuthView::SignedOut => view! { <LoginForm on_signed_in=on_signed_in /> }.into_any(),
            AuthView::SignedIn => panel().into_any(),
        }}
    }
}
