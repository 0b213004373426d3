//! Dotted Atlas App
//!
//! Picks the page from the URL path: `/admin` is the admin panel, anything
//! else is the header and the scroll map.

use leptos::prelude::*;

use crate::client::build_client;
use crate::components::{AdminPage, Header, WorldMap};
use crate::context::StoreContext;

const ADMIN_PATH: &str = "/admin";

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

pub fn is_admin_path(path: &str) -> bool {
    let path = path.trim_end_matches('/');
    path == ADMIN_PATH
}

/// Full navigation to another page of the site
pub fn navigate_to(path: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().set_href(path) {
        log::error!("navigation to {} failed: {:?}", path, e);
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(StoreContext::new(build_client()));

    if is_admin_path(&current_path()) {
        view! { <AdminPage /> }.into_any()
    } else {
        view! {
            <div class="app">
                <Header />
                <main class="main-content">
                    <WorldMap />
                </main>
            </div>
        }
        .into_any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_path() {
        assert!(is_admin_path("/admin"));
        assert!(is_admin_path("/admin/"));
        assert!(!is_admin_path("/"));
        assert!(!is_admin_path("/administrator"));
        assert!(!is_admin_path("/admin/pins"));
    }
}
