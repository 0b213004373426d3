//! Pin Detail Component
//!
//! Full-page panel for a clicked explore pin.

use leptos::prelude::*;
use pin_store::Pin;

use crate::links::{parse_links, LinkSegment};

fn intro_view(intro: &str) -> impl IntoView {
    parse_links(intro)
        .into_iter()
        .map(|segment| match segment {
            LinkSegment::Text(text) => text.into_any(),
            LinkSegment::Link { label, url } => view! {
                <a href=url target="_blank" rel="noopener noreferrer">{label}</a>
            }
            .into_any(),
        })
        .collect_view()
}

#[component]
pub fn PinDetail(pin: Pin, on_back: Callback<()>) -> impl IntoView {
    let music = pin.music().cloned();
    let has_writing = !pin.writing.is_empty();

    view! {
        <div class="pin-modal-overlay">
            <div class="pin-modal-full" on:click=|ev| ev.stop_propagation()>
                <button class="pin-modal-back" on:click=move |_| on_back.run(())>
                    "← back"
                </button>

                <div class="pin-modal-content">
                    <h1 class="pin-modal-title">{pin.title.clone()}</h1>

                    <section class="pin-section">
                        <p class="pin-intro">{intro_view(&pin.intro)}</p>
                    </section>

                    <section class="pin-section">
                        <h3 class="pin-section-title">"questions i have"</h3>
                        <ul class="pin-list">
                            {pin.questions.iter().map(|q| view! { <li>{q.clone()}</li> }).collect_view()}
                        </ul>
                    </section>

                    {has_writing.then(|| view! {
                        <section class="pin-section">
                            <h3 class="pin-section-title">"writing & projects"</h3>
                            <ul class="pin-list">
                                {pin.writing.iter().map(|w| view! {
                                    <li>
                                        <a href=w.url.clone() target="_blank" rel="noopener noreferrer">{w.title.clone()}</a>
                                    </li>
                                }).collect_view()}
                            </ul>
                        </section>
                    })}

                    <section class="pin-section">
                        <h3 class="pin-section-title">"things i've read"</h3>
                        <BookList books=pin.read.clone() />
                    </section>

                    <section class="pin-section">
                        <h3 class="pin-section-title">"things i want to read"</h3>
                        <BookList books=pin.to_read.clone() />
                    </section>
                </div>

                {music.map(|m| view! {
                    <div class="pin-music-player">
                        <div class="music-cover">
                            <div class="music-cover-placeholder">"♫"</div>
                        </div>
                        <div class="music-info">
                            <span class="music-title">{m.title}</span>
                            <span class="music-artist">{m.artist}</span>
                        </div>
                        <div class="music-controls">
                            <button class="music-btn">"▶"</button>
                            <button class="music-btn">"🔊"</button>
                        </div>
                    </div>
                })}
            </div>
        </div>
    }
}

#[component]
fn BookList(books: Vec<pin_store::BookEntry>) -> impl IntoView {
    view! {
        <ul class="pin-list">
            {books.into_iter().map(|b| view! {
                <li><em>{b.title}</em>" — "{b.author}</li>
            }).collect_view()}
        </ul>
    }
}
