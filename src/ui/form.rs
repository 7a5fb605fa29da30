//! Modal add/edit form.

use crate::app::{Form, FormField, TextInput};
use crate::models::TagColor;
use crate::ui::colors::RosePine;
use crate::ui::components::centered_rect;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph},
};

const TEXT_HEIGHT: u16 = 8;

pub fn render_form(frame: &mut Frame, area: Rect, form: &Form) {
    let popup = centered_rect(64, TEXT_HEIGHT + 14, area);
    frame.render_widget(Clear, popup);

    let outer = Block::bordered()
        .border_type(BorderType::Rounded)
        .title(format!(" {} ", form.heading()))
        .style(Style::default().fg(RosePine::IRIS).bg(RosePine::BASE));
    let inner = outer.inner(popup);
    frame.render_widget(outer, popup);

    let [title_area, text_area, helpers_area, tag_area, prompt_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(TEXT_HEIGHT + 2),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .areas(inner);

    let cursor_title = render_input(
        frame,
        title_area,
        " Title ",
        &form.title,
        form.focus == FormField::Title,
    );
    let cursor_text = render_input(
        frame,
        text_area,
        " Content ",
        &form.text,
        form.focus == FormField::Text,
    );

    let helpers = Paragraph::new(Line::from(vec![
        Span::styled(" [^D] ", Style::default().fg(RosePine::GOLD)),
        Span::styled("{{date}}", Style::default().fg(RosePine::SUBTLE)),
        Span::styled("  [^T] ", Style::default().fg(RosePine::GOLD)),
        Span::styled("{{time}}", Style::default().fg(RosePine::SUBTLE)),
        Span::styled("  [^U] ", Style::default().fg(RosePine::GOLD)),
        Span::styled("{{custom}}", Style::default().fg(RosePine::SUBTLE)),
    ]));
    frame.render_widget(helpers, helpers_area);

    render_tag_picker(frame, tag_area, form);

    let cursor = match &form.custom_placeholder {
        Some(prompt) => render_input(frame, prompt_area, " Variable name ", prompt, true),
        None => match form.focus {
            FormField::Title => cursor_title,
            FormField::Text => cursor_text,
            FormField::Tag => None,
        },
    };

    if let Some(position) = cursor {
        frame.set_cursor_position(position);
    }
}

/// Draws a bordered input and returns where the cursor belongs when focused
fn render_input(
    frame: &mut Frame,
    area: Rect,
    label: &'static str,
    input: &TextInput,
    focused: bool,
) -> Option<Position> {
    let border = if focused {
        RosePine::FOAM
    } else {
        RosePine::HIGHLIGHT_HIGH
    };
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .title(label)
        .border_style(Style::default().fg(border));

    let visible_rows = area.height.saturating_sub(2);
    let (line, column) = input.cursor_position();
    let scroll = (line as u16).saturating_sub(visible_rows.saturating_sub(1));

    let paragraph = Paragraph::new(input.value())
        .style(Style::default().fg(RosePine::TEXT))
        .scroll((scroll, 0))
        .block(block);
    frame.render_widget(paragraph, area);

    if !focused {
        return None;
    }
    let x = (area.x + 1 + column as u16).min(area.right().saturating_sub(2));
    let y = area.y + 1 + (line as u16 - scroll);
    Some(Position::new(x, y))
}

fn render_tag_picker(frame: &mut Frame, area: Rect, form: &Form) {
    let focused = form.focus == FormField::Tag;
    let border = if focused {
        RosePine::FOAM
    } else {
        RosePine::HIGHLIGHT_HIGH
    };

    let mut spans = vec![Span::styled(
        " ◀ ",
        Style::default().fg(RosePine::SUBTLE),
    )];
    let none_style = if form.color.is_empty() {
        Style::default()
            .fg(RosePine::TEXT)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(RosePine::MUTED)
    };
    spans.push(Span::styled(" none ", none_style));

    for tag in TagColor::ALL {
        spans.push(Span::raw(" "));
        let mut style = Style::default()
            .fg(RosePine::BASE)
            .bg(tag.display_color());
        if form.tag() == Some(tag) {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        spans.push(Span::styled(format!(" {tag} "), style));
    }
    spans.push(Span::styled(" ▶", Style::default().fg(RosePine::SUBTLE)));

    if !form.color.is_empty() && form.tag().is_none() {
        spans.push(Span::styled(
            format!("  ({})", form.color),
            Style::default().fg(RosePine::MUTED),
        ));
    }

    let picker = Paragraph::new(Line::from(spans)).block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" Tag ")
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(picker, area);
}
