//! UI Components
//!
//! Leptos components for the public map and the admin panel.

mod admin_page;
mod header;
mod log_panel;
mod login_form;
mod pin_detail;
mod pin_editor;
mod terminal_box;
mod world_map;

pub use admin_page::AdminPage;
pub use header::Header;
pub use log_panel::LogPanel;
pub use login_form::LoginForm;
pub use pin_detail::PinDetail;
pub use pin_editor::PinEditor;
pub use terminal_box::TerminalBox;
pub use world_map::WorldMap;
