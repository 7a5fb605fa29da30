//! Key handling: maps crossterm key events onto [`crate::app::ViewController`] calls.

pub mod keys;
