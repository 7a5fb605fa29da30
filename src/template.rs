//! `{{name}}` placeholders in snippet text.
//!
//! Only `date` and `time` have a meaning (case-insensitive). Any other
//! name is left exactly as written so users can keep their own markers in
//! a snippet and fill them in after pasting.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{(\w+)\}\}").expect("placeholder pattern is valid")
});

pub const DATE_PLACEHOLDER: &str = "{{date}}";
pub const TIME_PLACEHOLDER: &str = "{{time}}";

/// strftime patterns used for `{{date}}` and `{{time}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFormats {
    pub date: String,
    pub time: String,
}

impl Default for TemplateFormats {
    fn default() -> Self {
        Self {
            date: "%-m/%-d/%Y".to_string(),
            time: "%-I:%M:%S %p".to_string(),
        }
    }
}

impl TemplateFormats {
    /// Rejects patterns chrono cannot format, which would otherwise panic at render time
    pub fn check(&self) -> Result<(), String> {
        for (name, pattern) in [("date", &self.date), ("time", &self.time)] {
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(format!("invalid {name} format: {pattern:?}"));
            }
        }
        Ok(())
    }
}

/// Substitutes placeholders using the current local time.
pub fn render(text: &str, formats: &TemplateFormats) -> String {
    render_at(text, &Local::now(), formats)
}

/// Substitutes placeholders as of `now`.
pub fn render_at<Tz>(text: &str, now: &DateTime<Tz>, formats: &TemplateFormats) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| {
            match caps[1].to_ascii_lowercase().as_str() {
                "date" => now.format(&formats.date).to_string(),
                "time" => now.format(&formats.time).to_string(),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Wraps a user supplied name as a placeholder. Returns `None` for names
/// that would never be recognized as one (empty or containing non-word
/// characters after trimming).
pub fn custom_placeholder(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    Some(format!("{{{{{name}}}}}"))
}
