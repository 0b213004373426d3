//! Login Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;
use pin_store::SignInOutcome;

use crate::app::navigate_to;
use crate::context::use_store_context;
use crate::store::{login_error_message, use_admin_store, AdminStateStoreFields};

#[component]
pub fn LoginForm(on_signed_in: Callback<()>) -> impl IntoView {
    let ctx = use_store_context();
    let store = use_admin_store();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        store.error().set(None);
        let email = email.get_untracked();
        let password = password.get_untracked();
        spawn_local(async move {
            match ctx.sign_in(email, password).await {
                SignInOutcome::Success(_) => on_signed_in.run(()),
                SignInOutcome::Failure(message) => store.error().set(Some(login_error_message(&message))),
            }
        });
    };

    view! {
        <div class="admin-login">
            <form class="admin-login-form" on:submit=submit>
                <h1>"admin"</h1>
                {move || store.error().get().map(|e| view! { <div class="admin-error">{e}</div> })}
                <input
                    type="email"
                    placeholder="email"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <button type="submit">"login"</button>
                <button type="button" class="admin-back" on:click=move |_| navigate_to("/")>
                    "← back to site"
                </button>
            </form>
        </div>
    }
}
