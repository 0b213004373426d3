//! Pin Entity
//!
//! A user-authored point of interest on the map. `Pin` is the app-side shape;
//! `PinRecord` and `PinUpdate` are the row shapes of the `pins` table.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// A piece of writing or project, shown as a link
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WritingEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

/// A book on the read / to-read lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
}

/// Song attached to a pin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Music {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub url: String,
}

impl Music {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.artist.is_empty() && self.url.is_empty()
    }
}

/// A point of interest as the app sees it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    /// Unique identifier
    pub id: i64,
    /// Short name, used as the marker key
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Heading of the detail view
    pub title: String,
    /// Free text, may contain `[label](url)` links
    pub intro: String,
    pub questions: Vec<String>,
    pub writing: Vec<WritingEntry>,
    pub read: Vec<BookEntry>,
    #[serde(rename = "toRead")]
    pub to_read: Vec<BookEntry>,
    pub music: Option<Music>,
}

impl Pin {
    pub fn new(id: i64, name: &str, lat: f64, lng: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            lat,
            lng,
            title: name.to_string(),
            ..Default::default()
        }
    }

    /// Music with at least one non-empty field
    pub fn music(&self) -> Option<&Music> {
        self.music.as_ref().filter(|m| !m.is_empty())
    }
}

impl Entity for Pin {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Row of the `pins` table. List columns may be null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PinRecord {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub intro: Option<String>,
    #[serde(default)]
    pub questions: Option<Vec<String>>,
    #[serde(default)]
    pub writing: Option<Vec<WritingEntry>>,
    #[serde(default)]
    pub read: Option<Vec<BookEntry>>,
    #[serde(default)]
    pub to_read: Option<Vec<BookEntry>>,
    #[serde(default)]
    pub music: Option<Music>,
}

impl From<PinRecord> for Pin {
    fn from(record: PinRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            lat: record.lat,
            lng: record.lng,
            title: record.title,
            intro: record.intro.unwrap_or_default(),
            questions: record.questions.unwrap_or_default(),
            writing: record.writing.unwrap_or_default(),
            read: record.read.unwrap_or_default(),
            to_read: record.to_read.unwrap_or_default(),
            music: record.music.filter(|m| !m.is_empty()),
        }
    }
}

/// Full field set written by an update (everything except the id)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PinUpdate<'a> {
    pub name: &'a str,
    pub lat: f64,
    pub lng: f64,
    pub title: &'a str,
    pub intro: &'a str,
    pub questions: &'a [String],
    pub writing: &'a [WritingEntry],
    pub read: &'a [BookEntry],
    pub to_read: &'a [BookEntry],
    pub music: Option<&'a Music>,
}

impl<'a> From<&'a Pin> for PinUpdate<'a> {
    fn from(pin: &'a Pin) -> Self {
        Self {
            name: &pin.name,
            lat: pin.lat,
            lng: pin.lng,
            title: &pin.title,
            intro: &pin.intro,
            questions: &pin.questions,
            writing: &pin.writing,
            read: &pin.read,
            to_read: &pin.to_read,
            music: pin.music(),
        }
    }
}

impl PinUpdate<'_> {
    /// Apply this update to a stored row
    pub fn apply_to(&self, record: &mut PinRecord) {
        record.name = self.name.to_string();
        record.lat = self.lat;
        record.lng = self.lng;
        record.title = self.title.to_string();
        record.intro = Some(self.intro.to_string());
        record.questions = Some(self.questions.to_vec());
        record.writing = Some(self.writing.to_vec());
        record.read = Some(self.read.to_vec());
        record.to_read = Some(self.to_read.to_vec());
        record.music = self.music.cloned();
    }
}
