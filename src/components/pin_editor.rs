//! Pin Editor Component
//!
//! Form for one pin of the admin working copy. Inputs read their value from
//! the store and write back through `PinEdit`, so only list add/remove
//! re-renders rows and typing keeps focus.

use leptos::prelude::*;
use pin_store::{BookEntry, Pin};

use crate::edit::{music_field, BookField, BookList, MusicField, PinEdit, WritingField};
use crate::store::{store_apply_edit, store_find_pin, use_admin_store};

#[component]
pub fn PinEditor(id: i64) -> impl IntoView {
    let store = use_admin_store();
    let pin = Memo::new(move |_| store_find_pin(&store, id));
    let edit = move |e: PinEdit| store_apply_edit(&store, id, e);
    let field = move |f: fn(&Pin) -> String| move || pin.with(|p| p.as_ref().map(f).unwrap_or_default());

    let questions = Memo::new(move |_| pin.with(|p| p.as_ref().map_or(0, |p| p.questions.len())));
    let writing = Memo::new(move |_| pin.with(|p| p.as_ref().map_or(0, |p| p.writing.len())));

    view! {
        <div class="admin-form">
            <h2>{field(|p| p.title.clone())}</h2>

            <div class="admin-field">
                <label>"Title"</label>
                <input
                    type="text"
                    prop:value=field(|p| p.title.clone())
                    on:input=move |ev| edit(PinEdit::Title(event_target_value(&ev)))
                />
            </div>

            <div class="admin-field">
                <label>"Intro"</label>
                <textarea
                    rows=4
                    prop:value=field(|p| p.intro.clone())
                    on:input=move |ev| edit(PinEdit::Intro(event_target_value(&ev)))
                ></textarea>
                <small>"Tip: Use [link text](url) for hyperlinks"</small>
            </div>

            <div class="admin-field">
                <label>"Questions"</label>
                {move || (0..questions.get()).map(|i| view! {
                    <div class="admin-array-item">
                        <input
                            type="text"
                            prop:value=move || pin.with(|p| {
                                p.as_ref().and_then(|p| p.questions.get(i).cloned()).unwrap_or_default()
                            })
                            on:input=move |ev| edit(PinEdit::Question(i, event_target_value(&ev)))
                        />
                        <button on:click=move |_| edit(PinEdit::RemoveQuestion(i))>"×"</button>
                    </div>
                }).collect_view()}
                <button class="admin-add-btn" on:click=move |_| edit(PinEdit::AddQuestion)>
                    "+ add question"
                </button>
            </div>

            <div class="admin-field">
                <label>"Writing & Projects"</label>
                {move || (0..writing.get()).map(|i| {
                    let value = move |f: WritingField| move || pin.with(|p| {
                        p.as_ref()
                            .and_then(|p| p.writing.get(i))
                            .map(|w| match f {
                                WritingField::Title => w.title.clone(),
                                WritingField::Url => w.url.clone(),
                            })
                            .unwrap_or_default()
                    });
                    view! {
                        <div class="admin-array-item double">
                            <input
                                type="text"
                                placeholder="Title"
                                prop:value=value(WritingField::Title)
                                on:input=move |ev| edit(PinEdit::Writing(i, WritingField::Title, event_target_value(&ev)))
                            />
                            <input
                                type="text"
                                placeholder="URL"
                                prop:value=value(WritingField::Url)
                                on:input=move |ev| edit(PinEdit::Writing(i, WritingField::Url, event_target_value(&ev)))
                            />
                            <button on:click=move |_| edit(PinEdit::RemoveWriting(i))>"×"</button>
                        </div>
                    }
                }).collect_view()}
                <button class="admin-add-btn" on:click=move |_| edit(PinEdit::AddWriting)>
                    "+ add writing"
                </button>
            </div>

            <BookFields id=id pin=pin list=BookList::Read label="Things I've Read" />
            <BookFields id=id pin=pin list=BookList::ToRead label="Things I Want to Read" />

            <div class="admin-field">
                <label>"Music"</label>
                <div class="admin-array-item double">
                    <input
                        type="text"
                        placeholder="Song Title"
                        prop:value=move || pin.with(|p| music_field(p.as_ref().and_then(|p| p.music.as_ref()), MusicField::Title))
                        on:input=move |ev| edit(PinEdit::Music(MusicField::Title, event_target_value(&ev)))
                    />
                    <input
                        type="text"
                        placeholder="Artist"
                        prop:value=move || pin.with(|p| music_field(p.as_ref().and_then(|p| p.music.as_ref()), MusicField::Artist))
                        on:input=move |ev| edit(PinEdit::Music(MusicField::Artist, event_target_value(&ev)))
                    />
                </div>
                <input
                    type="text"
                    class="admin-music-url"
                    placeholder="Audio URL (from Supabase Storage)"
                    prop:value=move || pin.with(|p| music_field(p.as_ref().and_then(|p| p.music.as_ref()), MusicField::Url))
                    on:input=move |ev| edit(PinEdit::Music(MusicField::Url, event_target_value(&ev)))
                />
            </div>
        </div>
    }
}

fn books(pin: &Pin, list: BookList) -> &[BookEntry] {
    match list {
        BookList::Read => &pin.read,
        BookList::ToRead => &pin.to_read,
    }
}

/// Title/author rows for the read or to-read list
#[component]
fn BookFields(id: i64, pin: Memo<Option<Pin>>, list: BookList, label: &'static str) -> impl IntoView {
    let store = use_admin_store();
    let edit = move |e: PinEdit| store_apply_edit(&store, id, e);
    let count = Memo::new(move |_| pin.with(|p| p.as_ref().map_or(0, |p| books(p, list).len())));

    view! {
        <div class="admin-field">
            <label>{label}</label>
            {move || (0..count.get()).map(|i| {
                let value = move |f: BookField| move || pin.with(|p| {
                    p.as_ref()
                        .and_then(|p| books(p, list).get(i).cloned())
                        .map(|b| match f {
                            BookField::Title => b.title,
                            BookField::Author => b.author,
                        })
                        .unwrap_or_default()
                });
                view! {
                    <div class="admin-array-item double">
                        <input
                            type="text"
                            placeholder="Title"
                            prop:value=value(BookField::Title)
                            on:input=move |ev| edit(PinEdit::Book(list, i, BookField::Title, event_target_value(&ev)))
                        />
                        <input
                            type="text"
                            placeholder="Author"
                            prop:value=value(BookField::Author)
                            on:input=move |ev| edit(PinEdit::Book(list, i, BookField::Author, event_target_value(&ev)))
                        />
                        <button on:click=move |_| edit(PinEdit::RemoveBook(list, i))>"×"</button>
                    </div>
                }
            }).collect_view()}
            <button class="admin-add-btn" on:click=move |_| edit(PinEdit::AddBook(list))>
                "+ add book"
            </button>
        </div>
    }
}
