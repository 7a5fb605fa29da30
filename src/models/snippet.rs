use crate::error::ValidationError;
use crate::models::tags::TagColor;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored snippet.
///
/// Serialized as `{ id, title, text, color }`, the same field names older
/// collections without ids used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    /// Tag identifier, empty when untagged
    #[serde(default)]
    pub color: String,
}

impl Snippet {
    pub fn new(draft: SnippetDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            text: draft.text,
            color: draft.color,
        }
    }

    /// Recognized tag, if any
    pub fn tag(&self) -> Option<TagColor> {
        TagColor::from_id(&self.color)
    }

    /// Same title and text, ignoring id and tag
    pub fn same_content(&self, title: &str, text: &str) -> bool {
        self.title == title && self.text == text
    }
}

/// Snippet contents as entered by the user, before an id is attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetDraft {
    pub title: String,
    pub text: String,
    pub color: String,
}

impl SnippetDraft {
    pub fn new(title: impl Into<String>, text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            color: color.into(),
        }
    }

    /// Trims title and text and rejects either being empty.
    pub fn validate(self) -> Result<Self, ValidationError> {
        let title = self.title.trim().to_string();
        let text = self.text.trim().to_string();

        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }

        Ok(Self {
            title,
            text,
            color: self.color,
        })
    }
}

impl From<&Snippet> for SnippetDraft {
    fn from(snippet: &Snippet) -> Self {
        Self {
            title: snippet.title.clone(),
            text: snippet.text.clone(),
            color: snippet.color.clone(),
        }
    }
}

/// On-disk record. Collections written before ids existed have no `id`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StoredSnippet {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl StoredSnippet {
    /// Converts into a [`Snippet`], returning whether an id had to be assigned
    pub fn into_snippet(self) -> (Snippet, bool) {
        let assigned = self.id.is_none();
        let snippet = Snippet {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            title: self.title,
            text: self.text,
            color: self.color.unwrap_or_default(),
        };
        (snippet, assigned)
    }
}
