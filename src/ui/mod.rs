//! User Interface Module
//!
//! Rendering for the popup. Everything here reads the view controller and
//! draws; no function in this module changes state.

pub mod colors;
pub mod components;
pub mod form;
pub mod snippets;

use crate::app::ViewController;
use crate::clipboard::ClipboardSink;
use crate::models::KeyValueStore;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

/// Draws the whole popup: header, filter bar, list, bottom bar, and the
/// form on top when it is open.
pub fn render<S, C>(frame: &mut Frame, app: &ViewController<S, C>)
where
    S: KeyValueStore,
    C: ClipboardSink,
{
    let area = frame.area();
    let show_filter = !app.filter_tags().is_empty() || app.state().active_filter().is_some();
    let filter_height = if show_filter { 3 } else { 0 };

    let [header, filter, list, bottom] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(filter_height),
        Constraint::Fill(1),
        Constraint::Length(3),
    ])
    .areas(area);

    components::render_header(frame, header, app);
    if filter_height > 0 {
        snippets::render_filter_bar(frame, filter, app);
    }
    snippets::render_snippet_list(frame, list, app);
    components::render_bottom_bar(frame, bottom, app);

    if let Some(form) = app.form() {
        form::render_form(frame, area, form);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ViewSettings;
    use crate::clipboard::MemoryClipboard;
    use crate::models::{MemoryStore, SnippetDraft, SnippetStore};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::time::Instant;

    type TestController = ViewController<MemoryStore, MemoryClipboard>;

    /// Render into an in-memory buffer and return plain text (no styles).
    fn render_to_string(app: &TestController, w: u16, h: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buf = terminal.backend().buffer().clone();
        buf.content
            .chunks(buf.area.width as usize)
            .map(|row| {
                let s: String = row.iter().map(|cell| cell.symbol()).collect();
                s.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    async fn seeded(drafts: &[(&str, &str, &str)]) -> TestController {
        let mut app = ViewController::new(
            SnippetStore::new(MemoryStore::new()),
            MemoryClipboard::default(),
            ViewSettings::default(),
        );
        for (title, text, color) in drafts {
            app.store()
                .add(SnippetDraft::new(*title, *text, *color))
                .await
                .unwrap();
        }
        app.refresh().await;
        app
    }

    #[tokio::test]
    async fn empty_collection_shows_hint_and_no_filter_bar() {
        let app = seeded(&[]).await;
        let screen = render_to_string(&app, 80, 20);
        assert!(screen.contains("No snippets yet"));
        assert!(!screen.contains("[0] All"));
    }

    #[tokio::test]
    async fn list_shows_rendered_text_and_filter_buttons() {
        let app = seeded(&[
            ("Greeting", "Hi {{name}}", "blue"),
            ("Stamp", "on {{unknown}}", "red"),
        ])
        .await;
        let screen = render_to_string(&app, 80, 20);
        assert!(screen.contains("Greeting"));
        assert!(screen.contains("Hi {{name}}"));
        assert!(screen.contains("[0] All"));
        assert!(screen.contains("[1] blue"));
        assert!(screen.contains("[2] red"));
    }

    #[tokio::test]
    async fn filtered_view_hides_other_tags() {
        let mut app = seeded(&[("Greeting", "Hi", "blue"), ("Other", "x", "red")]).await;
        app.toggle_filter("red").await;
        let screen = render_to_string(&app, 80, 20);
        assert!(screen.contains("Other"));
        assert!(!screen.contains("Greeting"));
    }

    #[tokio::test]
    async fn filter_without_matches_keeps_the_bar() {
        let mut app = seeded(&[("Greeting", "Hi", "blue")]).await;
        app.toggle_filter("red").await;
        let screen = render_to_string(&app, 80, 20);
        assert!(!screen.contains("Greeting"));
        assert!(screen.contains("[0] All"));
        assert!(screen.contains("red"));
    }

    #[tokio::test]
    async fn delete_mode_marks_rows_and_copy_shows_ack() {
        let mut app = seeded(&[("Greeting", "Hi", "")]).await;
        app.activate_selected(Instant::now()).await;
        assert!(render_to_string(&app, 80, 20).contains("Copied!"));

        app.toggle_delete_mode().await;
        let screen = render_to_string(&app, 80, 20);
        assert!(screen.contains("DELETE"));
        assert!(screen.contains("Greeting –"));
    }

    #[tokio::test]
    async fn open_form_is_drawn_over_the_list() {
        let mut app = seeded(&[("Greeting", "Hi", "")]).await;
        app.open_new_form();
        let screen = render_to_string(&app, 80, 30);
        assert!(screen.contains("Add New Snippet"));
        assert!(screen.contains("Title"));
        assert!(screen.contains("{{date}}"));
        assert!(screen.contains("yellow"));
    }
}
