//! Story Data
//!
//! The fixed scroll narrative: sections, the cities they mention and the
//! countries to highlight.

/// Code standing for "every story country / every story pin"
pub const ALL: &str = "ALL";

/// Dots outside every story country
pub const REST: &str = "REST";

/// One step of the scroll narrative
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    pub id: &'static str,
    pub text: &'static str,
    pub city_label: &'static str,
    pub countries: &'static [&'static str],
    pub pins: &'static [&'static str],
    /// Simple sections show plain text, no reveal animation
    pub is_simple: bool,
}

impl Section {
    pub fn is_all(&self) -> bool {
        self.countries.contains(&ALL)
    }

    /// Countries without the `ALL` marker, in reveal order
    pub fn named_countries(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.countries.iter().copied().filter(|c| *c != ALL)
    }

    /// Pins without the `ALL` marker, in reveal order
    pub fn named_pins(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pins.iter().copied().filter(|p| *p != ALL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PinCategory {
    Past,
    Future,
    Current,
}

impl PinCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PinCategory::Past => "past",
            PinCategory::Future => "future",
            PinCategory::Current => "current",
        }
    }
}

/// A city named by the narrative
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoryPin {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub category: PinCategory,
}

pub const STORY_SECTIONS: &[Section] = &[
    Section {
        id: "start",
        text: "",
        city_label: "",
        countries: &[],
        pins: &[],
        is_simple: true,
    },
    Section {
        id: "born",
        text: "born in 🇪🇸 madrid (but don't ask me to speak spanish)",
        city_label: "Madrid, Spain",
        countries: &["ESP"],
        pins: &["Madrid"],
        is_simple: false,
    },
    Section {
        id: "origins",
        text: "originally 🇫🇷 french & 🇬🇷 greek (so ik what good food is)",
        city_label: "Paris, France  ·  Athens, Greece",
        countries: &["FRA", "GRC"],
        pins: &["Paris", "Athens"],
        is_simple: false,
    },
    Section {
        id: "grewup",
        text: "grew up all over 🇩🇪🇫🇷🇨🇳 (and surprisingly chinese is the language that stuck)",
        city_label: "Düsseldorf, Germany  ·  Shanghai, China",
        countries: &["DEU", "CHN"],
        pins: &["Düsseldorf", "Shanghai"],
        is_simple: false,
    },
    Section {
        id: "school",
        text: "studied in philly (upenn), now working in new york (hebbia) 🇺🇸",
        city_label: "Philadelphia  ·  New York City",
        countries: &["USA"],
        pins: &["Philadelphia", "NYC"],
        is_simple: false,
    },
    Section {
        id: "explore",
        text: "click dots :)",
        city_label: "",
        countries: &[ALL],
        pins: &[ALL],
        is_simple: true,
    },
];

pub const STORY_PINS: &[StoryPin] = &[
    StoryPin { name: "Madrid", lat: 40.4168, lng: -3.7038, category: PinCategory::Past },
    StoryPin { name: "Düsseldorf", lat: 51.2277, lng: 6.7735, category: PinCategory::Past },
    StoryPin { name: "Shanghai", lat: 31.2304, lng: 121.4737, category: PinCategory::Past },
    StoryPin { name: "Athens", lat: 37.9838, lng: 23.7275, category: PinCategory::Past },
    StoryPin { name: "Paris", lat: 48.8566, lng: 2.3522, category: PinCategory::Past },
    StoryPin { name: "Philadelphia", lat: 39.9526, lng: -75.1652, category: PinCategory::Past },
    StoryPin { name: "NYC", lat: 40.7128, lng: -74.0060, category: PinCategory::Current },
];

/// Countries the story walks through, in tagging priority
pub const STORY_COUNTRIES: &[&str] = &["ESP", "FRA", "GRC", "DEU", "CHN", "USA"];

/// Countries highlighted as visited in explore mode
pub const VISITED_COUNTRIES: &[&str] = &[
    "AUS", "ZAF", "MAR", "ARE", "OMN", "EGY", "JOR", "ARG", "BRA", "GTM", "MEX",
    "FRA", "GBR", "ESP", "ITA", "PRT", "HUN", "GRC", "VNM", "MMR", "LKA",
    "JPN", "KOR", "SGP", "UKR", "ISL", "DEU", "CHN", "USA",
];
