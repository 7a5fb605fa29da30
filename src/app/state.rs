//! Transient popup state and its transitions.
//!
//! Nothing here is persisted. All changes go through the methods on
//! [`ViewState`] so Edit and Delete mode can never be active together.

use super::input::TextInput;
use crate::models::{Snippet, SnippetDraft, TagColor};
use crate::template;
use uuid::Uuid;

/// What activating a snippet does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Copy the rendered text
    #[default]
    Normal,
    /// Load the snippet into the form
    Edit,
    /// Remove the snippet
    Delete,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Edit => "EDIT",
            Mode::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Text,
    Tag,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Text,
            FormField::Text => FormField::Tag,
            FormField::Tag => FormField::Title,
        }
    }

    fn previous(self) -> Self {
        match self {
            FormField::Title => FormField::Tag,
            FormField::Text => FormField::Title,
            FormField::Tag => FormField::Text,
        }
    }
}

/// The add/edit form's working copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    /// Snippet being edited, `None` when adding
    pub editing: Option<Uuid>,
    pub title: TextInput,
    pub text: TextInput,
    /// Stored tag identifier. Starts as the edited snippet's value, which may
    /// be unrecognized; the picker only ever sets recognized tags or empty.
    pub color: String,
    pub focus: FormField,
    /// Name being typed for a custom `{{name}}` placeholder
    pub custom_placeholder: Option<TextInput>,
}

impl Form {
    pub fn new_snippet() -> Self {
        Self {
            editing: None,
            title: TextInput::default(),
            text: TextInput::default(),
            color: String::new(),
            focus: FormField::Title,
            custom_placeholder: None,
        }
    }

    pub fn for_snippet(snippet: &Snippet) -> Self {
        Self {
            editing: Some(snippet.id),
            title: TextInput::new(snippet.title.clone()),
            text: TextInput::new(snippet.text.clone()),
            color: snippet.color.clone(),
            focus: FormField::Title,
            custom_placeholder: None,
        }
    }

    pub fn heading(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Snippet"
        } else {
            "Add New Snippet"
        }
    }

    pub fn draft(&self) -> SnippetDraft {
        SnippetDraft::new(self.title.value(), self.text.value(), self.color.clone())
    }

    pub fn tag(&self) -> Option<TagColor> {
        TagColor::from_id(&self.color)
    }

    pub fn cycle_tag(&mut self, forward: bool) {
        let current = self.tag();
        let next = if forward {
            TagColor::cycle(current)
        } else {
            TagColor::cycle_back(current)
        };
        self.color = next.map(|t| t.id().to_string()).unwrap_or_default();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Input that typing goes to, if the focused field is a text field
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        if self.custom_placeholder.is_some() {
            return self.custom_placeholder.as_mut();
        }
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Text => Some(&mut self.text),
            FormField::Tag => None,
        }
    }

    /// Inserts a placeholder into the text field at its cursor and focuses it
    pub fn insert_placeholder(&mut self, placeholder: &str) {
        self.text.insert_str(placeholder);
        self.focus = FormField::Text;
    }

    pub fn begin_custom_placeholder(&mut self) {
        self.custom_placeholder = Some(TextInput::default());
    }

    /// Inserts `{{name}}` for the typed name. Returns false, inserting
    /// nothing, when the name is empty or not a valid placeholder name.
    pub fn confirm_custom_placeholder(&mut self) -> bool {
        let Some(prompt) = self.custom_placeholder.take() else {
            return false;
        };
        match template::custom_placeholder(prompt.value()) {
            Some(placeholder) => {
                self.insert_placeholder(&placeholder);
                true
            }
            None => false,
        }
    }

    pub fn cancel_custom_placeholder(&mut self) {
        self.custom_placeholder = None;
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormState {
    #[default]
    Closed,
    Open(Form),
}

/// Mode, tag filter and form, changed only through transition methods.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    mode: Mode,
    active_filter: Option<String>,
    form: FormState,
}

impl ViewState {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn active_filter(&self) -> Option<&str> {
        self.active_filter.as_deref()
    }

    pub fn form(&self) -> Option<&Form> {
        match &self.form {
            FormState::Open(form) => Some(form),
            FormState::Closed => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut Form> {
        match &mut self.form {
            FormState::Open(form) => Some(form),
            FormState::Closed => None,
        }
    }

    pub fn is_form_open(&self) -> bool {
        matches!(self.form, FormState::Open(_))
    }

    /// Normal <-> Edit; leaves Delete mode if it was active
    pub fn toggle_edit_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Edit => Mode::Normal,
            Mode::Normal | Mode::Delete => Mode::Edit,
        };
    }

    /// Normal <-> Delete; leaves Edit mode if it was active
    pub fn toggle_delete_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Delete => Mode::Normal,
            Mode::Normal | Mode::Edit => Mode::Delete,
        };
    }

    /// Selects `tag`, or clears the filter when `tag` is already selected
    pub fn toggle_filter(&mut self, tag: &str) {
        if tag.is_empty() || self.active_filter.as_deref() == Some(tag) {
            self.active_filter = None;
        } else {
            self.active_filter = Some(tag.to_string());
        }
    }

    pub fn clear_filter(&mut self) {
        self.active_filter = None;
    }

    /// Opens an empty form. Adding always leaves Edit mode.
    pub fn open_new_form(&mut self) {
        if self.mode == Mode::Edit {
            self.mode = Mode::Normal;
        }
        self.form = FormState::Open(Form::new_snippet());
    }

    pub fn open_edit_form(&mut self, snippet: &Snippet) {
        self.form = FormState::Open(Form::for_snippet(snippet));
    }

    pub fn close_form(&mut self) {
        self.form = FormState::Closed;
    }

    /// Whether a snippet passes the active filter
    pub fn shows(&self, snippet: &Snippet) -> bool {
        match &self.active_filter {
            Some(tag) => snippet.color == *tag,
            None => true,
        }
    }
}
