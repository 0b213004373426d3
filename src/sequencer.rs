//! Scroll Sequencer
//!
//! Maps the scroll position to a section and walks each section through its
//! animation phases. The state machine is pure: it never touches timers. Every
//! transition returns a [`Schedule`] telling the caller which timer to start,
//! and timer callbacks report back with the generation they were started
//! under, so callbacks from an earlier section are ignored.

use crate::story::Section;

/// How long the country/pin reveal runs before the text starts typing
pub const ANIMATION_DURATION_MS: u32 = 2400;

/// Delay between two typed characters
pub const TYPEWRITER_INTERVAL_MS: u32 = 25;

/// Section for a scroll fraction, always within `0..count`.
///
/// Negative or non-finite fractions map to the first section.
pub fn section_index(fraction: f64, count: usize) -> usize {
    if count == 0 || !fraction.is_finite() || fraction <= 0.0 {
        return 0;
    }
    let raw = (fraction * count as f64).floor();
    (raw as usize).min(count - 1)
}

/// Scroll progress of a container, 0 when it cannot scroll
pub fn scroll_fraction(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let range = scroll_height - client_height;
    if range <= 0.0 {
        return 0.0;
    }
    scroll_top / range
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationPhase {
    /// Simple section, nothing animates
    #[default]
    Idle,
    /// Countries and pins are lighting up
    Animating,
    /// Reveal finished, text is typing or typed
    Done,
}

impl AnimationPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationPhase::Idle => "idle",
            AnimationPhase::Animating => "animating",
            AnimationPhase::Done => "done",
        }
    }
}

/// Timer work requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Nothing,
    /// Call `finish_animation(generation)` after `after_ms`
    FinishAnimation { generation: u64, after_ms: u32 },
    /// Call `reveal_step(generation)` every `every_ms` until it stops returning `Continue`
    Reveal { generation: u64, every_ms: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStep {
    /// More characters to come
    Continue,
    /// The whole text is shown
    Finished,
    /// The section changed since the timer started
    Stale,
}

#[derive(Debug, Clone)]
pub struct Sequencer {
    sections: &'static [Section],
    index: usize,
    phase: AnimationPhase,
    displayed: String,
    /// Byte offset into the section text, always on a char boundary
    revealed: usize,
    selected_pin: Option<i64>,
    generation: u64,
    animation_key: u64,
}

impl Sequencer {
    /// Starts on the first section without any schedule; call
    /// `enter_section(0)` once timers can run.
    pub fn new(sections: &'static [Section]) -> Self {
        Self {
            sections,
            index: 0,
            phase: AnimationPhase::Idle,
            displayed: String::new(),
            revealed: 0,
            selected_pin: None,
            generation: 0,
            animation_key: 0,
        }
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn section(&self) -> Option<&'static Section> {
        self.sections.get(self.index)
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn displayed_text(&self) -> &str {
        &self.displayed
    }

    pub fn selected_pin(&self) -> Option<i64> {
        self.selected_pin
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Changes on every section entry; used to restart CSS animations
    pub fn animation_key(&self) -> u64 {
        self.animation_key
    }

    pub fn is_start(&self) -> bool {
        self.index == 0
    }

    pub fn is_explore(&self) -> bool {
        self.index + 1 == self.sections.len()
    }

    /// New scroll position; `None` while the section stays the same
    pub fn on_scroll(&mut self, fraction: f64) -> Option<Schedule> {
        let index = section_index(fraction, self.sections.len());
        if index == self.index {
            return None;
        }
        Some(self.enter_section(index))
    }

    /// Reset and start the given section. The caller cancels all pending
    /// timers before applying the returned schedule.
    pub fn enter_section(&mut self, index: usize) -> Schedule {
        self.index = index.min(self.sections.len().saturating_sub(1));
        self.generation += 1;
        self.animation_key += 1;
        self.displayed.clear();
        self.revealed = 0;
        self.selected_pin = None;

        let Some(section) = self.section() else {
            self.phase = AnimationPhase::Idle;
            return Schedule::Nothing;
        };
        log::debug!("entering section {} ({})", self.index, section.id);

        if section.is_simple {
            self.phase = AnimationPhase::Idle;
            Schedule::Nothing
        } else if !section.countries.is_empty() {
            self.phase = AnimationPhase::Animating;
            Schedule::FinishAnimation {
                generation: self.generation,
                after_ms: ANIMATION_DURATION_MS,
            }
        } else {
            self.phase = AnimationPhase::Done;
            self.reveal_schedule()
        }
    }

    pub fn finish_animation(&mut self, generation: u64) -> Schedule {
        if generation != self.generation || self.phase != AnimationPhase::Animating {
            return Schedule::Nothing;
        }
        self.phase = AnimationPhase::Done;
        self.reveal_schedule()
    }

    /// Show one more character of the section text
    pub fn reveal_step(&mut self, generation: u64) -> RevealStep {
        if generation != self.generation || self.phase != AnimationPhase::Done {
            return RevealStep::Stale;
        }
        let Some(section) = self.section() else {
            return RevealStep::Stale;
        };
        match section.text[self.revealed..].chars().next() {
            Some(c) => {
                self.displayed.push(c);
                self.revealed += c.len_utf8();
                if self.revealed == section.text.len() {
                    RevealStep::Finished
                } else {
                    RevealStep::Continue
                }
            }
            None => RevealStep::Finished,
        }
    }

    pub fn select_pin(&mut self, id: i64) {
        self.selected_pin = Some(id);
    }

    pub fn close_detail(&mut self) {
        self.selected_pin = None;
    }

    fn reveal_schedule(&self) -> Schedule {
        match self.section() {
            Some(section) if !section.text.is_empty() => Schedule::Reveal {
                generation: self.generation,
                every_ms: TYPEWRITER_INTERVAL_MS,
            },
            _ => Schedule::Nothing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::STORY_SECTIONS;

    static TEST_SECTIONS: &[Section] = &[
        Section { id: "start", text: "", city_label: "", countries: &[], pins: &[], is_simple: true },
        Section { id: "paris", text: "café ✓", city_label: "Paris", countries: &["FRA"], pins: &["Paris"], is_simple: false },
        Section { id: "quiet", text: "no map", city_label: "", countries: &[], pins: &[], is_simple: false },
        Section { id: "end", text: "bye", city_label: "", countries: &["ALL"], pins: &["ALL"], is_simple: true },
    ];

    fn reveal_all(seq: &mut Sequencer, generation: u64) -> usize {
        let mut steps = 0;
        loop {
            steps += 1;
            match seq.reveal_step(generation) {
                RevealStep::Continue => continue,
                RevealStep::Finished => return steps,
                RevealStep::Stale => panic!("stale reveal"),
            }
        }
    }

    #[test]
    fn test_section_index_formula() {
        let n = 6;
        for i in 0..1000 {
            let f = i as f64 / 1000.0;
            assert_eq!(section_index(f, n), ((f * n as f64).floor() as usize).min(n - 1));
        }
        assert_eq!(section_index(1.0, n), n - 1);
        assert_eq!(section_index(1.7, n), n - 1);
    }

    #[test]
    fn test_section_index_bad_input() {
        assert_eq!(section_index(-0.3, 6), 0);
        assert_eq!(section_index(f64::NAN, 6), 0);
        assert_eq!(section_index(f64::INFINITY, 6), 0);
        assert_eq!(section_index(0.5, 0), 0);
    }

    #[test]
    fn test_scroll_fraction() {
        assert_eq!(scroll_fraction(250.0, 1500.0, 500.0), 0.25);
        assert_eq!(scroll_fraction(0.0, 500.0, 500.0), 0.0);
        assert_eq!(scroll_fraction(10.0, 400.0, 500.0), 0.0);
    }

    #[test]
    fn test_scroll_within_section_is_noop() {
        let mut seq = Sequencer::new(TEST_SECTIONS);
        seq.enter_section(0);
        assert_eq!(seq.on_scroll(0.1), None);
        assert!(seq.on_scroll(0.3).is_some());
        assert_eq!(seq.index(), 1);
    }

    #[test]
    fn test_animated_section_reveals_text_after_animation() {
        let mut seq = Sequencer::new(TEST_SECTIONS);
        let schedule = seq.enter_section(1);
        let generation = seq.generation();
        assert_eq!(schedule, Schedule::FinishAnimation { generation, after_ms: ANIMATION_DURATION_MS });
        assert_eq!(seq.phase(), AnimationPhase::Animating);
        assert_eq!(seq.reveal_step(generation), RevealStep::Stale);

        let schedule = seq.finish_animation(generation);
        assert_eq!(schedule, Schedule::Reveal { generation, every_ms: TYPEWRITER_INTERVAL_MS });
        assert_eq!(seq.phase(), AnimationPhase::Done);

        // One step per character, not per byte
        assert_eq!(reveal_all(&mut seq, generation), "café ✓".chars().count());
        assert_eq!(seq.displayed_text(), "café ✓");
    }

    #[test]
    fn test_reveal_after_finish_stays_finished() {
        let mut seq = Sequencer::new(TEST_SECTIONS);
        seq.enter_section(1);
        let generation = seq.generation();
        seq.finish_animation(generation);
        reveal_all(&mut seq, generation);

        assert_eq!(seq.reveal_step(generation), RevealStep::Finished);
        assert_eq!(seq.displayed_text(), "café ✓");
    }

    #[test]
    fn test_section_without_countries_reveals_at_once() {
        let mut seq = Sequencer::new(TEST_SECTIONS);
        let schedule = seq.enter_section(2);
        assert_eq!(seq.phase(), AnimationPhase::Done);
        assert_eq!(schedule, Schedule::Reveal { generation: seq.generation(), every_ms: TYPEWRITER_INTERVAL_MS });
    }

    #[test]
    fn test_simple_section_is_idle() {
        let mut seq = Sequencer::new(TEST_SECTIONS);
        assert_eq!(seq.enter_section(3), Schedule::Nothing);
        assert_eq!(seq.phase(), AnimationPhase::Idle);
        assert!(seq.is_explore());
        assert_eq!(seq.displayed_text(), "");
    }

    #[test]
    fn test_section_change_resets_text_and_detail() {
        let mut seq = Sequencer::new(TEST_SECTIONS);
        seq.enter_section(2);
        let generation = seq.generation();
        seq.reveal_step(generation);
        seq.reveal_step(generation);
        seq.select_pin(4);
        assert_eq!(seq.displayed_text(), "no");

        seq.on_scroll(0.99);
        assert_eq!(seq.displayed_text(), "");
        assert_eq!(seq.selected_pin(), None);
    }

    #[test]
    fn test_stale_timers_are_ignored() {
        let mut seq = Sequencer::new(TEST_SECTIONS);
        seq.enter_section(1);
        let old = seq.generation();
        seq.enter_section(2);

        assert_eq!(seq.finish_animation(old), Schedule::Nothing);
        assert_eq!(seq.reveal_step(old), RevealStep::Stale);
        assert_eq!(seq.displayed_text(), "");
    }

    #[test]
    fn test_animation_key_bumps_on_every_entry() {
        let mut seq = Sequencer::new(TEST_SECTIONS);
        let key = seq.animation_key();
        seq.enter_section(1);
        seq.enter_section(1);
        assert_eq!(seq.animation_key(), key + 2);
    }

    #[test]
    fn test_detail_open_and_close() {
        let mut seq = Sequencer::new(STORY_SECTIONS);
        seq.enter_section(STORY_SECTIONS.len() - 1);
        seq.select_pin(12);
        assert_eq!(seq.selected_pin(), Some(12));
        seq.close_detail();
        assert_eq!(seq.selected_pin(), None);
    }

    #[test]
    fn test_story_sections_reveal_full_text() {
        let mut seq = Sequencer::new(STORY_SECTIONS);
        for (index, section) in STORY_SECTIONS.iter().enumerate() {
            match seq.enter_section(index) {
                Schedule::FinishAnimation { generation, .. } => {
                    seq.finish_animation(generation);
                    reveal_all(&mut seq, generation);
                    assert_eq!(seq.displayed_text(), section.text);
                }
                Schedule::Reveal { generation, .. } => {
                    reveal_all(&mut seq, generation);
                    assert_eq!(seq.displayed_text(), section.text);
                }
                Schedule::Nothing => assert!(section.is_simple),
            }
        }
    }
}
