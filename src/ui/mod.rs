//! Terminal screens for the admin console.
//!
//! Each screen owns a state struct, a `render_*` function and a
//! `handle_input` that maps one key to an optional action for the app loop.

pub mod analytics;
pub mod components;
pub mod inquiry_wizard;
pub mod login;
pub mod project_detail;
pub mod project_wizard;
pub mod projects;
pub mod settings;
pub mod submissions;
