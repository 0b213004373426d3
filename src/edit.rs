//! Admin Edits
//!
//! One variant per input in the pin editor. Edits change a local copy only;
//! nothing reaches the backend until "save changes".

use pin_store::{BookEntry, Music, Pin, WritingEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritingField {
    Title,
    Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookList {
    Read,
    ToRead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Title,
    Author,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicField {
    Title,
    Artist,
    Url,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PinEdit {
    Title(String),
    Intro(String),
    Question(usize, String),
    AddQuestion,
    RemoveQuestion(usize),
    Writing(usize, WritingField, String),
    AddWriting,
    RemoveWriting(usize),
    Book(BookList, usize, BookField, String),
    AddBook(BookList),
    RemoveBook(BookList, usize),
    Music(MusicField, String),
}

fn books(pin: &mut Pin, list: BookList) -> &mut Vec<BookEntry> {
    match list {
        BookList::Read => &mut pin.read,
        BookList::ToRead => &mut pin.to_read,
    }
}

fn remove_at<T>(items: &mut Vec<T>, index: usize) {
    if index < items.len() {
        items.remove(index);
    }
}

impl PinEdit {
    /// Apply to a pin. Indexes past the end are ignored.
    pub fn apply(self, pin: &mut Pin) {
        match self {
            PinEdit::Title(value) => pin.title = value,
            PinEdit::Intro(value) => pin.intro = value,
            PinEdit::Question(index, value) => {
                if let Some(q) = pin.questions.get_mut(index) {
                    *q = value;
                }
            }
            PinEdit::AddQuestion => pin.questions.push(String::new()),
            PinEdit::RemoveQuestion(index) => remove_at(&mut pin.questions, index),
            PinEdit::Writing(index, field, value) => {
                if let Some(entry) = pin.writing.get_mut(index) {
                    match field {
                        WritingField::Title => entry.title = value,
                        WritingField::Url => entry.url = value,
                    }
                }
            }
            PinEdit::AddWriting => pin.writing.push(WritingEntry::default()),
            PinEdit::RemoveWriting(index) => remove_at(&mut pin.writing, index),
            PinEdit::Book(list, index, field, value) => {
                if let Some(entry) = books(pin, list).get_mut(index) {
                    match field {
                        BookField::Title => entry.title = value,
                        BookField::Author => entry.author = value,
                    }
                }
            }
            PinEdit::AddBook(list) => books(pin, list).push(BookEntry::default()),
            PinEdit::RemoveBook(list, index) => remove_at(books(pin, list), index),
            PinEdit::Music(field, value) => {
                let mut music = pin.music.take().unwrap_or_default();
                match field {
                    MusicField::Title => music.title = value,
                    MusicField::Artist => music.artist = value,
                    MusicField::Url => music.url = value,
                }
                // Clearing every field removes the music card
                pin.music = (!music.is_empty()).then_some(music);
            }
        }
    }
}

/// Current value of a music field, empty when there is no music
pub fn music_field(music: Option<&Music>, field: MusicField) -> String {
    music
        .map(|m| match field {
            MusicField::Title => m.title.clone(),
            MusicField::Artist => m.artist.clone(),
            MusicField::Url => m.url.clone(),
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pin() -> Pin {
        Pin::new(1, "Lima", -12.05, -77.04)
    }

    #[test]
    fn test_scalar_fields() {
        let mut p = pin();
        PinEdit::Title("lima, peru".into()).apply(&mut p);
        PinEdit::Intro("see [this](https://x)".into()).apply(&mut p);
        assert_eq!(p.title, "lima, peru");
        assert_eq!(p.intro, "see [this](https://x)");
        assert_eq!(p.name, "Lima");
    }

    #[test]
    fn test_question_list() {
        let mut p = pin();
        PinEdit::AddQuestion.apply(&mut p);
        PinEdit::AddQuestion.apply(&mut p);
        PinEdit::Question(1, "second".into()).apply(&mut p);
        PinEdit::Question(7, "ignored".into()).apply(&mut p);
        assert_eq!(p.questions, vec!["".to_string(), "second".to_string()]);

        PinEdit::RemoveQuestion(0).apply(&mut p);
        PinEdit::RemoveQuestion(5).apply(&mut p);
        assert_eq!(p.questions, vec!["second".to_string()]);
    }

    #[test]
    fn test_writing_and_books() {
        let mut p = pin();
        PinEdit::AddWriting.apply(&mut p);
        PinEdit::Writing(0, WritingField::Url, "https://w".into()).apply(&mut p);
        PinEdit::AddBook(BookList::ToRead).apply(&mut p);
        PinEdit::Book(BookList::ToRead, 0, BookField::Author, "Borges".into()).apply(&mut p);

        assert_eq!(p.writing[0].url, "https://w");
        assert!(p.read.is_empty());
        assert_eq!(p.to_read[0].author, "Borges");

        PinEdit::RemoveBook(BookList::ToRead, 0).apply(&mut p);
        assert!(p.to_read.is_empty());
    }

    #[test]
    fn test_music_created_and_cleared() {
        let mut p = pin();
        assert_eq!(music_field(p.music.as_ref(), MusicField::Title), "");

        PinEdit::Music(MusicField::Title, "Toro Mata".into()).apply(&mut p);
        assert_eq!(music_field(p.music.as_ref(), MusicField::Title), "Toro Mata");
        assert_eq!(music_field(p.music.as_ref(), MusicField::Artist), "");

        PinEdit::Music(MusicField::Title, String::new()).apply(&mut p);
        assert_eq!(p.music, None);
    }
}
