//! Header Component
//!
//! Site name, three ticking world clocks and the social links.

use gloo_timers::callback::Interval;
use leptos::prelude::*;
use serde::Serialize;

const CLOCKS: &[(&str, &str)] = &[
    ("PARIS", "Europe/Paris"),
    ("NEW YORK", "America/New_York"),
    ("SHANGHAI", "Asia/Shanghai"),
];

const SOCIAL_LINKS: &[(&str, &str)] = &[
    ("2026", "https://docs.google.com/document/d/1tBCX9dw0gRl5RnJ1Jujtj04mgdBiQqJe89Dr-OsTynU/edit?tab=t.0"),
    ("substack", "https://substack.com/@timpv"),
    ("linkedin", "https://www.linkedin.com/in/timothee-perakis/"),
    ("x", "https://x.com/tperakisvalat"),
];

/// `Intl.DateTimeFormat` options for a 24-hour HH:MM:SS clock
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClockFormat<'a> {
    time_zone: &'a str,
    hour: &'static str,
    minute: &'static str,
    second: &'static str,
    hour12: bool,
}

fn format_clock(now_ms: f64, time_zone: &str) -> String {
    let options = ClockFormat {
        time_zone,
        hour: "2-digit",
        minute: "2-digit",
        second: "2-digit",
        hour12: false,
    };
    match serde_wasm_bindgen::to_value(&options) {
        Ok(options) => {
            let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(now_ms));
            date.to_locale_string("en-GB", &options).into()
        }
        Err(e) => {
            log::warn!("clock options for {}: {}", time_zone, e);
            String::new()
        }
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let (now, set_now) = signal(js_sys::Date::now());

    let ticker = StoredValue::new_local(Some(Interval::new(1_000, move || {
        set_now.set(js_sys::Date::now());
    })));
    on_cleanup(move || {
        ticker.try_update_value(|t| t.take());
    });

    view! {
        <header class="header">
            <div class="header-left">
                <span class="name">"tpv"</span>
                <div class="clocks">
                    {CLOCKS.iter().map(|(label, zone)| view! {
                        <div class="clock">
                            <span class="clock-label">{*label}</span>
                            <span class="clock-time">{move || format_clock(now.get(), zone)}</span>
                        </div>
                    }).collect_view()}
                </div>
            </div>

            <div class="header-right">
                {SOCIAL_LINKS.iter().map(|(label, url)| view! {
                    <a href=*url target="_blank" rel="noopener noreferrer" class="social-link">{*label}</a>
                }).collect_view()}
            </div>
        </header>
    }
}
