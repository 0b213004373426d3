//! Section classification: which dots and pins are current, past or neither
//! for the active section, and how far their reveal animation is delayed.

use std::collections::BTreeSet;

use crate::story::{Section, REST, STORY_COUNTRIES, STORY_PINS};

/// Seconds between consecutive countries of a section
pub const COUNTRY_DELAY: f64 = 0.6;

/// Seconds a pin waits for its country's dots to light up
pub const DOT_ANIMATION: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotState {
    Current,
    Past,
    Base,
}

impl DotState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DotState::Current => "current",
            DotState::Past => "past",
            DotState::Base => "base",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinState {
    Current,
    Past,
    Hidden,
}

impl PinState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PinState::Current => "current",
            PinState::Past => "past",
            PinState::Hidden => "hidden",
        }
    }
}

/// Current and past sets for one section. The two sets never overlap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionView {
    current_countries: BTreeSet<&'static str>,
    past_countries: BTreeSet<&'static str>,
    current_pins: BTreeSet<&'static str>,
    past_pins: BTreeSet<&'static str>,
    country_order: Vec<&'static str>,
    pin_order: Vec<&'static str>,
}

impl SectionView {
    /// Classify for `sections[index]`; an out-of-range index is clamped.
    pub fn new(sections: &[Section], index: usize) -> Self {
        let Some(last) = sections.len().checked_sub(1) else {
            return Self::default();
        };
        let index = index.min(last);
        let section = &sections[index];

        let (current_countries, current_pins): (BTreeSet<_>, BTreeSet<_>) = if section.is_all() {
            (
                STORY_COUNTRIES.iter().copied().chain([REST]).collect(),
                STORY_PINS.iter().map(|p| p.name).collect(),
            )
        } else {
            (section.named_countries().collect(), section.named_pins().collect())
        };

        let past_countries = sections[..index]
            .iter()
            .flat_map(|s| s.named_countries())
            .filter(|c| !current_countries.contains(c))
            .collect();
        let past_pins = sections[..index]
            .iter()
            .flat_map(|s| s.named_pins())
            .filter(|p| !current_pins.contains(p))
            .collect();

        Self {
            current_countries,
            past_countries,
            current_pins,
            past_pins,
            country_order: section.named_countries().collect(),
            pin_order: section.named_pins().collect(),
        }
    }

    pub fn dot_state(&self, country: &str) -> DotState {
        if self.current_countries.contains(country) {
            DotState::Current
        } else if self.past_countries.contains(country) {
            DotState::Past
        } else {
            DotState::Base
        }
    }

    pub fn pin_state(&self, name: &str) -> PinState {
        if self.current_pins.contains(name) {
            PinState::Current
        } else if self.past_pins.contains(name) {
            PinState::Past
        } else {
            PinState::Hidden
        }
    }

    /// Reveal delay in seconds; 0 for countries the section doesn't list
    pub fn country_delay(&self, country: &str) -> f64 {
        self.country_order
            .iter()
            .position(|c| *c == country)
            .map(|i| i as f64 * COUNTRY_DELAY)
            .unwrap_or(0.0)
    }

    /// Delay of the dot drawn under a current pin, in step with its country
    pub fn shadow_delay(&self, name: &str) -> f64 {
        self.pin_order
            .iter()
            .position(|p| *p == name)
            .map(|i| i as f64 * COUNTRY_DELAY)
            .unwrap_or(0.0)
    }

    pub fn pin_delay(&self, name: &str) -> f64 {
        self.pin_order
            .iter()
            .position(|p| *p == name)
            .map(|i| i as f64 * COUNTRY_DELAY + DOT_ANIMATION)
            .unwrap_or(0.0)
    }
}
