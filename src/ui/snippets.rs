use crate::app::{Mode, ViewController};
use crate::clipboard::ClipboardSink;
use crate::models::{KeyValueStore, tags};
use crate::ui::colors::{RosePine, mode_accent};
use crate::ui::components::truncate;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, List, ListItem, ListState, Paragraph},
};

/// "All" followed by one button per tag present in the collection.
/// Hidden entirely while no snippet is tagged.
pub fn render_filter_bar<S, C>(frame: &mut Frame, area: Rect, app: &ViewController<S, C>)
where
    S: KeyValueStore,
    C: ClipboardSink,
{
    let active = app.state().active_filter();
    let mut spans = vec![filter_button(" [0] All ", active.is_none(), None)];

    for (idx, tag) in app.filter_tags().iter().enumerate() {
        spans.push(Span::raw(" "));
        let label = format!(" [{}] {} ", idx + 1, tag);
        spans.push(filter_button(
            label,
            active == Some(tag.as_str()),
            tags::background_for(tag),
        ));
    }

    if let Some(tag) = active.filter(|tag| !app.filter_tags().iter().any(|t| t == tag)) {
        spans.push(Span::raw(" "));
        spans.push(filter_button(
            format!(" {tag} "),
            true,
            tags::background_for(tag),
        ));
    }

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" Filter ")
            .style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
    );
    frame.render_widget(bar, area);
}

fn filter_button(
    label: impl Into<String>,
    active: bool,
    background: Option<ratatui::style::Color>,
) -> Span<'static> {
    let mut style = match background {
        Some(bg) => Style::default().fg(RosePine::BASE).bg(bg),
        None => Style::default().fg(RosePine::TEXT),
    };
    if active {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED | Modifier::REVERSED);
    }
    Span::styled(label.into(), style)
}

/// The snippet list. Each row shows the title and the first line of the
/// rendered text on the tag's background.
pub fn render_snippet_list<S, C>(frame: &mut Frame, area: Rect, app: &ViewController<S, C>)
where
    S: KeyValueStore,
    C: ClipboardSink,
{
    let mode = app.mode();
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .title(format!(" Snippets · {} ", mode.label()))
        .border_style(Style::default().fg(if mode == Mode::Normal {
            RosePine::HIGHLIGHT_HIGH
        } else {
            mode_accent(mode)
        }));

    let visible = app.visible_snippets();
    if visible.is_empty() {
        let message = if app.snippets().is_empty() {
            "No snippets yet. Press [a] to add one."
        } else {
            "No snippets with this tag."
        };
        let empty = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(RosePine::MUTED))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let inner_width = area.width.saturating_sub(4) as usize;
    let flashed = app.flash().map(|f| f.id);
    let delete_marker = if mode == Mode::Delete { " – " } else { "" };

    let items: Vec<ListItem> = visible
        .iter()
        .map(|snippet| {
            let rendered = app.rendered_text(snippet);
            let preview = rendered.lines().next().unwrap_or("");
            let style = match tags::background_for(&snippet.color) {
                Some(bg) => Style::default().fg(RosePine::BASE).bg(bg),
                None => Style::default().fg(RosePine::TEXT),
            };

            let title_width = inner_width.saturating_sub(delete_marker.chars().count());
            let mut title_line = vec![Span::styled(
                truncate(&snippet.title, title_width),
                style.add_modifier(Modifier::BOLD),
            )];
            if !delete_marker.is_empty() {
                title_line.push(Span::styled(
                    delete_marker,
                    Style::default().fg(RosePine::LOVE).add_modifier(Modifier::BOLD),
                ));
            }
            if flashed == Some(snippet.id) {
                title_line.push(Span::styled(
                    " Copied!",
                    Style::default().fg(RosePine::FOAM).add_modifier(Modifier::BOLD),
                ));
            }

            let text_line = Line::from(Span::styled(truncate(preview, inner_width), style));
            let item = ListItem::new(vec![Line::from(title_line), text_line]);
            if flashed == Some(snippet.id) {
                item.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_symbol("▌ ")
        .highlight_style(Style::default().bg(RosePine::SURFACE));

    let mut state = ListState::default().with_selected(Some(app.selected()));
    frame.render_stateful_widget(list, area, &mut state);
}
