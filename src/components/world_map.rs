//! World Map Component
//!
//! Scroll container driving the Sequencer, the dotted SVG map and its
//! overlays. Timer handles live in a `ScheduledTasks` owned by this
//! component and are dropped on section change and teardown.

use gloo_timers::callback::{Interval, Timeout};
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use pin_store::Pin;
use wasm_bindgen::JsCast;

use crate::components::{PinDetail, TerminalBox};
use crate::context::use_store_context;
use crate::map::{DotState, MapData, PinState, SectionView};
use crate::sequencer::{scroll_fraction, section_index, AnimationPhase, RevealStep, Schedule, Sequencer};
use crate::story::STORY_SECTIONS;
use crate::timers::ScheduledTasks;

type Tasks = StoredValue<ScheduledTasks, LocalStorage>;

/// Start the timer a transition asked for
fn run_schedule(schedule: Schedule, sequencer: RwSignal<Sequencer>, tasks: Tasks) {
    match schedule {
        Schedule::Nothing => {}
        Schedule::FinishAnimation { generation, after_ms } => {
            let timeout = Timeout::new(after_ms, move || {
                if let Some(next) = sequencer.try_update(|s| s.finish_animation(generation)) {
                    run_schedule(next, sequencer, tasks);
                }
            });
            tasks.try_update_value(|t| t.set_timeout(timeout));
        }
        Schedule::Reveal { generation, every_ms } => {
            let interval = Interval::new(every_ms, move || {
                let step = sequencer.try_update(|s| s.reveal_step(generation));
                if step != Some(RevealStep::Continue) {
                    // Released once this tick has returned
                    spawn_local(async move {
                        tasks.try_update_value(|t| t.release_interval(generation));
                    });
                }
            });
            tasks.try_update_value(|t| t.set_interval(generation, interval));
        }
    }
}

/// Cancel everything pending, then start the new section's timers
fn restart(schedule: Schedule, sequencer: RwSignal<Sequencer>, tasks: Tasks) {
    tasks.try_update_value(|t| t.clear());
    run_schedule(schedule, sequencer, tasks);
}

fn delay_style(animating: bool, seconds: f64) -> String {
    if animating {
        format!("animation-delay: {}s", seconds)
    } else {
        String::new()
    }
}

fn map_svg(
    data: &MapData,
    classes: &SectionView,
    phase: AnimationPhase,
    explore: bool,
    sequencer: RwSignal<Sequencer>,
) -> impl IntoView {
    let animating_phase = phase == AnimationPhase::Animating;

    let dots = data
        .dots
        .iter()
        .map(|dot| {
            let state = classes.dot_state(dot.country);
            let animating = animating_phase && state == DotState::Current;
            let class = format!(
                "map-dot dot-{}{}{}",
                state.as_str(),
                if animating { " animating" } else { "" },
                if explore && dot.visited { " visited" } else { "" },
            );
            view! {
                <circle
                    cx=dot.x
                    cy=dot.y
                    r=0.22
                    class=class
                    style=delay_style(animating, classes.country_delay(dot.country))
                />
            }
        })
        .collect_view();

    let story = (!explore).then(|| {
        let current = data
            .story_pins
            .iter()
            .filter(|p| classes.pin_state(p.pin.name) == PinState::Current);
        let shadows = current
            .map(|p| {
                view! {
                    <circle
                        cx=p.x
                        cy=p.y
                        r=0.22
                        class=if animating_phase { "map-dot dot-current animating" } else { "map-dot dot-current" }
                        style=delay_style(animating_phase, classes.shadow_delay(p.pin.name))
                    />
                }
            })
            .collect_view();
        let pins = data
            .story_pins
            .iter()
            .map(|p| {
                let state = classes.pin_state(p.pin.name);
                let animating = animating_phase && state == PinState::Current;
                let class = format!(
                    "city-pin pin-{} pin-state-{}{}",
                    p.pin.category.as_str(),
                    state.as_str(),
                    if animating { " animating" } else { "" },
                );
                view! {
                    <circle
                        cx=p.x
                        cy=p.y
                        r=0.5
                        class=class
                        style=delay_style(animating, classes.pin_delay(p.pin.name))
                    />
                }
            })
            .collect_view();
        (shadows, pins)
    });

    let explore_pins = explore.then(|| {
        data.explore_pins
            .iter()
            .map(|p| {
                let id = p.pin.id;
                view! {
                    <g class="explore-pin-group" on:click=move |_| sequencer.update(|s| s.select_pin(id))>
                        <circle cx=p.x cy=p.y r=1.2 class="explore-pin-glow" />
                        <circle cx=p.x cy=p.y r=0.5 class="explore-pin" />
                    </g>
                }
            })
            .collect_view()
    });

    view! {
        <svg
            viewBox=format!("0 0 {} {}", data.width, data.height)
            class=if explore { "dotted-map explore-mode" } else { "dotted-map" }
        >
            {dots}
            {story}
            {explore_pins}
        </svg>
    }
}

#[component]
pub fn WorldMap() -> impl IntoView {
    let store = use_store_context();

    let sequencer = RwSignal::new(Sequencer::new(STORY_SECTIONS));
    let tasks: Tasks = StoredValue::new_local(ScheduledTasks::new());
    let pins = RwSignal::new(Vec::<Pin>::new());

    // Geometry depends on the fetched pins only, classification on the section only
    let map_data = Memo::new(move |_| pins.with(|p| MapData::build(p)));
    let index = Memo::new(move |_| sequencer.with(|s| s.index()));
    let section_view = Memo::new(move |_| SectionView::new(STORY_SECTIONS, index.get()));
    let phase = Memo::new(move |_| sequencer.with(|s| s.phase()));
    let animation_key = Memo::new(move |_| sequencer.with(|s| s.animation_key()));
    let displayed = Memo::new(move |_| sequencer.with(|s| s.displayed_text().to_string()));
    let selected = Memo::new(move |_| {
        let id = sequencer.with(|s| s.selected_pin())?;
        pins.with(|p| p.iter().find(|pin| pin.id == id).cloned())
    });
    let is_explore = Memo::new(move |_| sequencer.with(|s| s.is_explore()));
    let is_start = Memo::new(move |_| sequencer.with(|s| s.is_start()));
    let section = move || STORY_SECTIONS.get(index.get()).copied();

    // Load pins now and whenever the window regains focus; a failed fetch keeps the old ones
    let load_pins = move || {
        spawn_local(async move {
            if let Some(fetched) = store.fetch_pins().await {
                log::debug!("map has {} pins", fetched.len());
                pins.set(fetched);
            }
        });
    };
    load_pins();
    let focus = window_event_listener(ev::focus, move |_| load_pins());

    if let Some(first) = sequencer.try_update(|s| s.enter_section(0)) {
        restart(first, sequencer, tasks);
    }

    on_cleanup(move || {
        focus.remove();
        tasks.try_update_value(|t| t.clear());
    });

    let on_scroll = move |ev: ev::Event| {
        let Some(el) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok()) else {
            return;
        };
        let fraction = scroll_fraction(
            el.scroll_top() as f64,
            el.scroll_height() as f64,
            el.client_height() as f64,
        );
        let unchanged = sequencer
            .with_untracked(|s| section_index(fraction, s.section_count()) == s.index());
        if unchanged {
            return;
        }
        if let Some(Some(schedule)) = sequencer.try_update(|s| s.on_scroll(fraction)) {
            restart(schedule, sequencer, tasks);
        }
    };

    let close_detail = Callback::new(move |_: ()| sequencer.update(|s| s.close_detail()));

    view! {
        <div class="scroll-container" on:scroll=on_scroll>
            <div class="scroll-content">
                {STORY_SECTIONS.iter().map(|_| view! { <div class="scroll-section"></div> }).collect_view()}
            </div>

            <div class="map-fixed-container">
                <div class="top-content">
                    {move || section().map(|s| {
                        if s.is_simple {
                            let class = if is_explore.get() { "simple-text explore-mode" } else { "simple-text" };
                            let text = if is_start.get() { "scroll" } else { s.text };
                            view! { <div class=class>{text}</div> }.into_any()
                        } else if !s.city_label.is_empty() {
                            view! { <div class="city-label visible">{s.city_label}</div> }.into_any()
                        } else {
                            ().into_any()
                        }
                    })}
                </div>

                <div class="map-wrapper" data-phase=move || phase.get().as_str()>
                    {move || {
                        // Re-created per section so CSS animations restart
                        let _ = animation_key.get();
                        map_data.with(|data| {
                            section_view.with(|classes| map_svg(data, classes, phase.get(), is_explore.get(), sequencer))
                        })
                    }}
                </div>

                {move || selected.get().map(|pin| view! { <PinDetail pin=pin on_back=close_detail /> })}

                <TerminalBox
                    visible=Signal::derive(move || section().is_some_and(|s| !s.is_simple))
                    text=displayed
                />

                <Show when=move || is_explore.get()>
                    <div class="map-legend">
                        <div class="legend-item">
                            <span class="legend-dot visited"></span>
                            <span class="legend-label">"visited"</span>
                        </div>
                        <div class="legend-item">
                            <span class="legend-dot clickable"></span>
                            <span class="legend-label">"click me"</span>
                        </div>
                    </div>
                </Show>

                <Show when=move || is_start.get()>
                    <div class="scroll-indicator">
                        <div class="scroll-arrow"></div>
                    </div>
                </Show>
            </div>
        </div>
    }
}
