//! Write-only access to the clipboard.

use anyhow::{Context, Result};
use std::fmt;

pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new().context("Failed to open the system clipboard")?;
        Ok(Self { inner })
    }
}

impl fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SystemClipboard")
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text.to_owned())
            .context("Failed to write to the clipboard")
    }
}

/// Used when no system clipboard could be opened (e.g. a headless session).
/// Every copy fails with the reason captured at startup.
#[derive(Debug)]
pub struct UnavailableClipboard {
    reason: String,
}

impl UnavailableClipboard {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl ClipboardSink for UnavailableClipboard {
    fn set_text(&mut self, _text: &str) -> Result<()> {
        anyhow::bail!("Clipboard unavailable: {}", self.reason)
    }
}

/// Keeps every copied text in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    pub history: Vec<String>,
}

impl MemoryClipboard {
    pub fn last(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.history.push(text.to_string());
        Ok(())
    }
}

impl<C: ClipboardSink + ?Sized> ClipboardSink for Box<C> {
    fn set_text(&mut self, text: &str) -> Result<()> {
        (**self).set_text(text)
    }
}

/// Opens the system clipboard, or a sink that reports why it could not be.
pub fn system_or_unavailable() -> Box<dyn ClipboardSink> {
    match SystemClipboard::new() {
        Ok(clipboard) => Box::new(clipboard),
        Err(e) => {
            tracing::warn!(error = %e, "copying will be disabled");
            Box::new(UnavailableClipboard::new(format!("{e:#}")))
        }
    }
}
