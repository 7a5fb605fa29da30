//! snipsnap - a terminal popup for reusable text snippets
//!
//! Snippets are stored in a local key-value file, tagged with one of a few
//! colors, filtered by tag, edited in a modal form, and copied to the
//! clipboard with `{{date}}` / `{{time}}` placeholders filled in.

pub mod app;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod template;
pub mod ui;

pub use app::ViewController;
pub use error::{Error, Result};
