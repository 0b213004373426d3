//! Dotted Atlas Frontend Entry Point

mod app;
mod client;
mod components;
mod context;
mod edit;
mod links;
mod map;
mod sequencer;
mod store;
mod story;
mod timers;

use app::App;
use leptos::prelude::*;
use log::LevelFilter;

/// Name stamped on every log line
pub const APP_NAME: &str = "dotted-atlas";

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_logger::init_logger(APP_NAME, LevelFilter::Info) {
        web_sys::console::warn_1(&format!("logger already installed: {}", e).into());
    }
    log::info!("starting");
    mount_to_body(App);
}
