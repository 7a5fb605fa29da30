//! The popup's view controller.
//!
//! Holds the transient UI state, turns gestures into [`SnippetStore`] calls
//! and re-fetches the whole collection after every mutation or mode change.
//! The fetched list is only what the last render was built from; the store
//! itself is the source of truth.

pub mod input;
pub mod state;

pub use input::TextInput;
pub use state::{Form, FormField, FormState, Mode, ViewState};

use crate::clipboard::ClipboardSink;
use crate::error::Error;
use crate::models::{KeyValueStore, Snippet, SnippetMatch, SnippetStore, tags};
use crate::template::{self, TemplateFormats};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Settings the controller needs from the config file
#[derive(Debug, Clone)]
pub struct ViewSettings {
    pub copy_flash: Duration,
    pub formats: TemplateFormats,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            copy_flash: Duration::from_millis(300),
            formats: TemplateFormats::default(),
        }
    }
}

/// Acknowledgement shown on a row right after it was copied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyFlash {
    pub id: Uuid,
    pub until: Instant,
}

/// Result of activating a snippet, mostly useful to tests and logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Copied(String),
    Editing(Uuid),
    Deleted(Uuid),
    Nothing,
}

#[derive(Debug)]
pub struct ViewController<S, C> {
    store: SnippetStore<S>,
    clipboard: C,
    state: ViewState,
    snippets: Vec<Snippet>,
    selected: usize,
    flash: Option<CopyFlash>,
    settings: ViewSettings,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
    pub needs_redraw: bool,
}

impl<S: KeyValueStore, C: ClipboardSink> ViewController<S, C> {
    pub fn new(store: SnippetStore<S>, clipboard: C, settings: ViewSettings) -> Self {
        Self {
            store,
            clipboard,
            state: ViewState::default(),
            snippets: Vec::new(),
            selected: 0,
            flash: None,
            settings,
            error_message: None,
            success_message: None,
            needs_redraw: true,
        }
    }

    pub fn store(&self) -> &SnippetStore<S> {
        &self.store
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn form(&self) -> Option<&Form> {
        self.state.form()
    }

    pub fn form_mut(&mut self) -> Option<&mut Form> {
        self.state.form_mut()
    }

    pub fn flash(&self) -> Option<CopyFlash> {
        self.flash
    }

    /// Everything fetched by the last refresh, unfiltered
    pub fn snippets(&self) -> &[Snippet] {
        &self.snippets
    }

    /// Rows to render: the collection restricted to the active filter
    pub fn visible_snippets(&self) -> Vec<&Snippet> {
        self.snippets
            .iter()
            .filter(|s| self.state.shows(s))
            .collect()
    }

    /// Filter buttons after "All", in first-seen order
    pub fn filter_tags(&self) -> Vec<String> {
        tags::distinct_tags(self.snippets.iter().map(|s| s.color.as_str()))
    }

    /// Index into [`Self::visible_snippets`]
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_snippet(&self) -> Option<&Snippet> {
        self.visible_snippets().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let len = self.visible_snippets().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_previous(&mut self) {
        let len = self.visible_snippets().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Snippet text with placeholders substituted
    pub fn rendered_text(&self, snippet: &Snippet) -> String {
        template::render(&snippet.text, &self.settings.formats)
    }

    pub fn set_error_message(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
        self.success_message = None;
    }

    pub fn set_success_message(&mut self, message: impl Into<String>) {
        self.success_message = Some(message.into());
        self.error_message = None;
    }

    pub fn clear_messages(&mut self) {
        self.error_message = None;
        self.success_message = None;
    }

    fn report(&mut self, action: &str, error: &Error) {
        tracing::warn!(kind = error.kind(), %error, "{action} failed");
        self.set_error_message(error.to_string());
    }

    /// Re-fetches the collection. On failure the previous list stays on
    /// screen and an error notice is shown.
    pub async fn refresh(&mut self) -> bool {
        match self.store.list().await {
            Ok(snippets) => {
                self.apply(snippets);
                true
            }
            Err(e) => {
                self.report("loading snippets", &e);
                false
            }
        }
    }

    fn apply(&mut self, snippets: Vec<Snippet>) {
        self.snippets = snippets;

        let len = self.visible_snippets().len();
        self.selected = self.selected.min(len.saturating_sub(1));
        if self
            .flash
            .is_some_and(|f| !self.snippets.iter().any(|s| s.id == f.id))
        {
            self.flash = None;
        }
        self.needs_redraw = true;
    }

    /// Applies a view transition and refreshes. If the refresh fails the
    /// view goes back to how it was before the transition.
    async fn transition(&mut self, change: impl FnOnce(&mut Self)) -> bool {
        let previous = (self.state.clone(), self.selected);
        change(self);
        if self.refresh().await {
            return true;
        }
        (self.state, self.selected) = previous;
        self.needs_redraw = true;
        false
    }

    pub async fn toggle_edit_mode(&mut self) -> bool {
        let changed = self.transition(|app| app.state.toggle_edit_mode()).await;
        tracing::debug!(mode = ?self.state.mode(), changed, "mode toggle");
        changed
    }

    pub async fn toggle_delete_mode(&mut self) -> bool {
        let changed = self.transition(|app| app.state.toggle_delete_mode()).await;
        tracing::debug!(mode = ?self.state.mode(), changed, "mode toggle");
        changed
    }

    /// Selects `tag`, or clears the filter when it is already selected.
    /// A tag no snippet carries leaves an empty list until "All" is pressed.
    pub async fn toggle_filter(&mut self, tag: &str) -> bool {
        self.transition(|app| {
            app.state.toggle_filter(tag);
            app.selected = 0;
        })
        .await
    }

    /// The "All" button
    pub async fn clear_filter(&mut self) -> bool {
        self.transition(|app| {
            app.state.clear_filter();
            app.selected = 0;
        })
        .await
    }

    /// Filter bar by position: 0 is "All", `n` toggles the n-th tag button
    pub async fn press_filter_button(&mut self, slot: usize) {
        if slot == 0 {
            self.clear_filter().await;
            return;
        }
        if let Some(tag) = self.filter_tags().get(slot - 1).cloned() {
            self.toggle_filter(&tag).await;
        }
    }

    /// Activates the highlighted row according to the current mode
    pub async fn activate_selected(&mut self, now: Instant) -> Activation {
        let selected = self.selected_snippet().map(|s| s.id);
        match selected {
            Some(id) => self.activate(id, now).await,
            None => Activation::Nothing,
        }
    }

    pub async fn activate(&mut self, id: Uuid, now: Instant) -> Activation {
        let Some(snippet) = self.snippets.iter().find(|s| s.id == id).cloned() else {
            return Activation::Nothing;
        };

        match self.state.mode() {
            Mode::Normal => self.copy(&snippet, now),
            Mode::Edit => {
                self.state.open_edit_form(&snippet);
                self.clear_messages();
                Activation::Editing(id)
            }
            Mode::Delete => self.delete(&snippet).await,
        }
    }

    fn copy(&mut self, snippet: &Snippet, now: Instant) -> Activation {
        let text = self.rendered_text(snippet);
        match self.clipboard.set_text(&text) {
            Ok(()) => {
                tracing::debug!(id = %snippet.id, "copied snippet");
                self.flash = Some(CopyFlash {
                    id: snippet.id,
                    until: now + self.settings.copy_flash,
                });
                self.set_success_message(format!("Copied \"{}\"", snippet.title));
                self.needs_redraw = true;
                Activation::Copied(text)
            }
            Err(e) => {
                tracing::warn!(error = %e, "clipboard write failed");
                self.set_error_message(format!("{e:#}"));
                Activation::Nothing
            }
        }
    }

    async fn delete(&mut self, snippet: &Snippet) -> Activation {
        match self.store.delete(&SnippetMatch::Id(snippet.id)).await {
            Ok(snippets) => {
                self.apply(snippets);
                self.set_success_message(format!("Deleted \"{}\"", snippet.title));
                Activation::Deleted(snippet.id)
            }
            Err(e) => {
                self.report("delete", &e);
                Activation::Nothing
            }
        }
    }

    pub fn open_new_form(&mut self) {
        self.state.open_new_form();
        self.clear_messages();
        self.needs_redraw = true;
    }

    pub fn close_form(&mut self) {
        self.state.close_form();
        self.needs_redraw = true;
    }

    /// Validates the form and adds or updates the snippet.
    ///
    /// Invalid input never reaches the store. On a storage failure the form
    /// stays open with its contents so the user can retry.
    pub async fn save(&mut self) -> bool {
        let Some(form) = self.state.form() else {
            return false;
        };
        let editing = form.editing;
        let draft = match form.draft().validate() {
            Ok(draft) => draft,
            Err(e) => {
                tracing::debug!(%e, "rejected save");
                self.set_error_message(e.to_string());
                return false;
            }
        };

        let result = match editing {
            Some(id) => self.store.update(id, draft).await,
            None => self.store.add(draft).await,
        };

        match result {
            Ok(snippets) => {
                self.state.close_form();
                self.apply(snippets);
                self.set_success_message(if editing.is_some() {
                    "Snippet updated"
                } else {
                    "Snippet added"
                });
                true
            }
            Err(e @ Error::NotFound(_)) => {
                self.report("save", &e);
                self.state.close_form();
                self.refresh().await;
                false
            }
            Err(e) => {
                self.report("save", &e);
                false
            }
        }
    }

    /// Clears an expired copy flash. Returns true when something changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.flash {
            Some(flash) if now >= flash.until => {
                self.flash = None;
                self.needs_redraw = true;
                true
            }
            _ => false,
        }
    }
}
