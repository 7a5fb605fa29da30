//! Rose Pine Color Palette Module
//! Based on the official Rose Pine theme: https://rosepinetheme.com/
//!
//! Tag backgrounds are not part of the theme; they live with the tags in
//! `models::tags` so the stored identifiers and their colors stay in one table.

use ratatui::style::Color;
pub struct RosePine;

impl RosePine {
    pub const BASE: Color = Color::Rgb(25, 23, 36);
    pub const SURFACE: Color = Color::Rgb(31, 29, 46);
    pub const TEXT: Color = Color::Rgb(224, 222, 244);
    pub const SUBTLE: Color = Color::Rgb(144, 140, 170);
    pub const MUTED: Color = Color::Rgb(110, 106, 134);
    pub const LOVE: Color = Color::Rgb(235, 111, 146);
    pub const GOLD: Color = Color::Rgb(246, 193, 119);
    pub const FOAM: Color = Color::Rgb(156, 207, 216);
    pub const IRIS: Color = Color::Rgb(196, 167, 231);
    pub const HIGHLIGHT_HIGH: Color = Color::Rgb(82, 79, 103);
}

/// Accent for the mode indicator and the mode toggle that is on
pub fn mode_accent(mode: crate::app::Mode) -> Color {
    match mode {
        crate::app::Mode::Normal => RosePine::FOAM,
        crate::app::Mode::Edit => RosePine::GOLD,
        crate::app::Mode::Delete => RosePine::LOVE,
    }
}
