//! UI Components and Layout Module
//!
//! Header with the mode toggles, the bottom bar with notices and shortcuts,
//! and small layout helpers shared by the list and the form.

use crate::app::{Mode, ViewController};
use crate::clipboard::ClipboardSink;
use crate::models::KeyValueStore;
use crate::ui::colors::{RosePine, mode_accent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Title plus the add / edit / delete toggles. The toggle matching the
/// active mode is drawn filled.
pub fn render_header<S, C>(frame: &mut Frame, area: Rect, app: &ViewController<S, C>)
where
    S: KeyValueStore,
    C: ClipboardSink,
{
    let mode = app.mode();
    let toggle = |label: &'static str, on: bool, accent| {
        if on {
            Span::styled(
                label,
                Style::default()
                    .fg(RosePine::BASE)
                    .bg(accent)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(label, Style::default().fg(RosePine::SUBTLE))
        }
    };

    let line = Line::from(vec![
        Span::styled(
            " SnipSnap ",
            Style::default()
                .fg(RosePine::IRIS)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        toggle(" [a] Add ", false, RosePine::FOAM),
        Span::raw(" "),
        toggle(" [e] Edit ", mode == Mode::Edit, mode_accent(Mode::Edit)),
        Span::raw(" "),
        toggle(
            " [d] Delete ",
            mode == Mode::Delete,
            mode_accent(Mode::Delete),
        ),
    ]);

    let header = Paragraph::new(line).block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
    );
    frame.render_widget(header, area);
}

/// Notice on the left, context shortcuts on the right
pub fn render_bottom_bar<S, C>(frame: &mut Frame, area: Rect, app: &ViewController<S, C>)
where
    S: KeyValueStore,
    C: ClipboardSink,
{
    let chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let (notice, color) = match (&app.error_message, &app.success_message) {
        (Some(err), _) => (format!(" ✗ {err}"), RosePine::LOVE),
        (None, Some(ok)) => (format!(" ✓ {ok}"), RosePine::FOAM),
        (None, None) => (
            format!(" {} mode │ {} snippets", app.mode().label(), app.snippets().len()),
            RosePine::SUBTLE,
        ),
    };

    let left = Paragraph::new(notice)
        .alignment(Alignment::Left)
        .style(Style::default().fg(color))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
        );

    let right = Paragraph::new(get_context_shortcuts(app))
        .alignment(Alignment::Right)
        .style(Style::default().fg(RosePine::MUTED))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
        );

    frame.render_widget(left, chunks[0]);
    frame.render_widget(right, chunks[1]);
}

fn get_context_shortcuts<S, C>(app: &ViewController<S, C>) -> String
where
    S: KeyValueStore,
    C: ClipboardSink,
{
    if let Some(form) = app.form() {
        if form.custom_placeholder.is_some() {
            return " [⏎] Insert │ [Esc] Cancel ".to_string();
        }
        return " [Tab] Field │ [^S] Save │ [Esc] Close ".to_string();
    }

    let action = match app.mode() {
        Mode::Normal => "Copy",
        Mode::Edit => "Edit",
        Mode::Delete => "Delete",
    };
    format!(" [↑↓] Move │ [⏎] {action} │ [0-9] Filter │ [q] Quit ")
}

/// Centered rectangle of the given size, clipped to `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Cuts `s` to at most `max` display columns, marking the cut with `…`
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn truncate_respects_display_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefgh", 5), "abcd…");
        assert_eq!(truncate("日本語テキスト", 5), "日本…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn centered_rect_is_clipped() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_rect(20, 4, area), Rect::new(10, 3, 20, 4));
        assert_eq!(centered_rect(80, 40, area), area);
    }
}
