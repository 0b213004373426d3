//! Terminal Box Component
//!
//! Prompt line that shows the typewriter text. Always in the DOM so the
//! layout does not shift; hidden on simple sections.

use leptos::prelude::*;

#[component]
pub fn TerminalBox(
    #[prop(into)] visible: Signal<bool>,
    #[prop(into)] text: Signal<String>,
) -> impl IntoView {
    view! {
        <div
            class="terminal-box"
            style:visibility=move || if visible.get() { "visible" } else { "hidden" }
        >
            <span class="terminal-prompt">">"</span>
            <span class="terminal-text">
                {move || text.get()}
                <span class="terminal-cursor"></span>
            </span>
        </div>
    }
}
