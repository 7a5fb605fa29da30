//! Keyboard Input Handling Module
//!
//! Translates key presses into view controller transitions. Each handler
//! awaits the store call it triggers, so the next key is only read once the
//! previous read-modify-write and its re-fetch have finished.

use crate::app::{FormField, ViewController};
use crate::clipboard::ClipboardSink;
use crate::models::KeyValueStore;
use crate::template::{DATE_PLACEHOLDER, TIME_PLACEHOLDER};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Instant;

/// Main keyboard event handler and dispatcher.
/// Returns true when the popup should close.
pub async fn handle_key_events<S, C>(key: KeyEvent, app: &mut ViewController<S, C>) -> bool
where
    S: KeyValueStore,
    C: ClipboardSink,
{
    if key.kind == KeyEventKind::Release {
        return false;
    }

    app.needs_redraw = true;

    if app.state().is_form_open() {
        handle_form_keys(key, app).await;
        return false;
    }

    handle_list_keys(key, app).await
}

async fn handle_list_keys<S, C>(key: KeyEvent, app: &mut ViewController<S, C>) -> bool
where
    S: KeyValueStore,
    C: ClipboardSink,
{
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c'));
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,

        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),

        KeyCode::Enter | KeyCode::Char(' ') => {
            app.activate_selected(Instant::now()).await;
        }

        KeyCode::Char('a') | KeyCode::Char('n') => app.open_new_form(),
        KeyCode::Char('e') => {
            app.clear_messages();
            app.toggle_edit_mode().await;
        }
        KeyCode::Char('d') => {
            app.clear_messages();
            app.toggle_delete_mode().await;
        }

        // Filter bar: 0 is "All", 1..9 are the tag buttons in order
        KeyCode::Char(c @ '0'..='9') => {
            let slot = c.to_digit(10).unwrap_or(0) as usize;
            app.press_filter_button(slot).await;
        }

        KeyCode::Char('r') => {
            app.clear_messages();
            app.refresh().await;
        }

        _ => {}
    }

    false
}

async fn handle_form_keys<S, C>(key: KeyEvent, app: &mut ViewController<S, C>)
where
    S: KeyValueStore,
    C: ClipboardSink,
{
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && matches!(key.code, KeyCode::Char('s')) {
        app.save().await;
        return;
    }

    let Some(form) = app.form_mut() else {
        return;
    };

    // The custom placeholder prompt captures typing until confirmed or cancelled
    if let Some(prompt) = form.custom_placeholder.as_mut() {
        match key.code {
            KeyCode::Enter => {
                if !form.confirm_custom_placeholder() {
                    app.set_error_message("Placeholder names may only contain letters, digits and _");
                }
            }
            KeyCode::Esc => form.cancel_custom_placeholder(),
            KeyCode::Backspace => prompt.backspace(),
            KeyCode::Left => prompt.move_left(),
            KeyCode::Right => prompt.move_right(),
            KeyCode::Char(c) if !ctrl => prompt.insert_char(c),
            _ => {}
        }
        return;
    }

    if ctrl {
        match key.code {
            KeyCode::Char('d') => form.insert_placeholder(DATE_PLACEHOLDER),
            KeyCode::Char('t') => form.insert_placeholder(TIME_PLACEHOLDER),
            KeyCode::Char('u') => form.begin_custom_placeholder(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => {
            app.close_form();
            app.clear_messages();
        }
        KeyCode::Tab => form.focus_next(),
        KeyCode::BackTab => form.focus_previous(),
        KeyCode::Enter => {
            let focus = form.focus;
            match focus {
                FormField::Title => form.focus_next(),
                FormField::Text => form.text.insert_char('\n'),
                FormField::Tag => {
                    app.save().await;
                }
            }
        }
        KeyCode::Left if form.focus == FormField::Tag => form.cycle_tag(false),
        KeyCode::Right | KeyCode::Char(' ') if form.focus == FormField::Tag => {
            form.cycle_tag(true)
        }
        _ => {
            if let Some(input) = form.focused_input() {
                match key.code {
                    KeyCode::Char(c) => input.insert_char(c),
                    KeyCode::Backspace => input.backspace(),
                    KeyCode::Delete => input.delete(),
                    KeyCode::Left => input.move_left(),
                    KeyCode::Right => input.move_right(),
                    KeyCode::Home => input.home(),
                    KeyCode::End => input.end(),
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Mode, ViewSettings};
    use crate::clipboard::MemoryClipboard;
    use crate::models::{MemoryStore, SnippetDraft, SnippetStore};
    use pretty_assertions::assert_eq;

    type TestController = ViewController<MemoryStore, MemoryClipboard>;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn press(app: &mut TestController, keys: &[KeyEvent]) -> bool {
        let mut quit = false;
        for k in keys {
            quit = handle_key_events(*k, app).await;
        }
        quit
    }

    async fn type_text(app: &mut TestController, text: &str) {
        for c in text.chars() {
            handle_key_events(key(KeyCode::Char(c)), app).await;
        }
    }

    async fn controller() -> TestController {
        let mut app = ViewController::new(
            SnippetStore::new(MemoryStore::new()),
            MemoryClipboard::default(),
            ViewSettings::default(),
        );
        app.refresh().await;
        app
    }

    #[tokio::test]
    async fn add_snippet_through_the_form() {
        let mut app = controller().await;

        press(&mut app, &[key(KeyCode::Char('a'))]).await;
        assert!(app.state().is_form_open());

        type_text(&mut app, "Sign-off").await;
        press(&mut app, &[key(KeyCode::Enter)]).await;
        type_text(&mut app, "Thanks, sent ").await;
        press(&mut app, &[ctrl('d')]).await;
        press(&mut app, &[key(KeyCode::Enter)]).await;
        press(&mut app, &[ctrl('u')]).await;
        type_text(&mut app, "name").await;
        press(&mut app, &[key(KeyCode::Enter)]).await;
        press(
            &mut app,
            &[key(KeyCode::Tab), key(KeyCode::Right), key(KeyCode::Right)],
        )
        .await;
        press(&mut app, &[ctrl('s')]).await;

        assert!(!app.state().is_form_open());
        let listed = app.store().list().await.unwrap();
        assert_eq!(
            SnippetDraft::from(&listed[0]),
            SnippetDraft::new("Sign-off", "Thanks, sent {{date}}\n{{name}}", "blue")
        );
    }

    #[tokio::test]
    async fn quit_keys_only_apply_outside_the_form() {
        let mut app = controller().await;
        press(&mut app, &[key(KeyCode::Char('a'))]).await;
        assert!(!press(&mut app, &[key(KeyCode::Char('q'))]).await);
        assert!(!press(&mut app, &[key(KeyCode::Esc)]).await);
        assert!(!app.state().is_form_open());
        assert!(press(&mut app, &[key(KeyCode::Char('q'))]).await);
        assert!(press(&mut app, &[ctrl('c')]).await);
    }

    #[tokio::test]
    async fn mode_keys_are_exclusive() {
        let mut app = controller().await;
        press(&mut app, &[key(KeyCode::Char('e'))]).await;
        assert_eq!(app.mode(), Mode::Edit);
        press(&mut app, &[key(KeyCode::Char('d'))]).await;
        assert_eq!(app.mode(), Mode::Delete);
        press(&mut app, &[key(KeyCode::Char('d'))]).await;
        assert_eq!(app.mode(), Mode::Normal);
    }

    #[tokio::test]
    async fn enter_in_normal_mode_copies() {
        let mut app = controller().await;
        app.store()
            .add(SnippetDraft::new("a", "plain text", ""))
            .await
            .unwrap();
        press(&mut app, &[key(KeyCode::Char('r')), key(KeyCode::Enter)]).await;
        assert_eq!(app.clipboard().last(), Some("plain text"));
    }

    #[tokio::test]
    async fn invalid_custom_placeholder_inserts_nothing() {
        let mut app = controller().await;
        press(&mut app, &[key(KeyCode::Char('a')), key(KeyCode::Tab), ctrl('u')]).await;
        type_text(&mut app, "two words").await;
        press(&mut app, &[key(KeyCode::Enter)]).await;

        let form = app.form().unwrap();
        assert_eq!(form.text.value(), "");
        assert!(form.custom_placeholder.is_none());
        assert!(app.error_message.is_some());
    }
}
