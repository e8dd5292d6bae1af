//! Clipboard access
//!
//! Copy writes two flavors at once: the raw bytes (a private binary payload
//! only this process understands) and a plain-text fallback for other
//! applications. Paste prefers the binary payload.

use crate::error::{CodeAreaError, Result};

/// What a copy writes and a paste reads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardContent {
    pub binary: Option<Vec<u8>>,
    pub text: Option<String>,
}

impl ClipboardContent {
    pub fn new(binary: Vec<u8>, text: String) -> Self {
        Self {
            binary: Some(binary),
            text: Some(text),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            binary: None,
            text: Some(text.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.binary.as_ref().map_or(true, |b| b.is_empty())
            && self.text.as_ref().map_or(true, |t| t.is_empty())
    }
}

/// Platform clipboard seam
pub trait ClipboardProvider {
    fn set_contents(&mut self, content: ClipboardContent) -> Result<()>;

    fn contents(&mut self) -> Result<ClipboardContent>;
}

// ============================================================================
// System clipboard
// ============================================================================

/// OS clipboard through `arboard`.
///
/// The OS only carries the text flavor. The binary payload stays in this
/// process, tagged with the text it was copied alongside; it is returned
/// only while the OS clipboard still holds that same text, so a copy from
/// another application wins.
#[derive(Debug, Default)]
pub struct SystemClipboard {
    private: Option<(String, Vec<u8>)>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn open() -> Result<arboard::Clipboard> {
        arboard::Clipboard::new().map_err(|e| CodeAreaError::ClipboardUnavailable(e.to_string()))
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_contents(&mut self, content: ClipboardContent) -> Result<()> {
        let text = content.text.unwrap_or_default();
        let mut clipboard = Self::open()?;
        clipboard
            .set_text(text.clone())
            .map_err(|e| CodeAreaError::ClipboardUnavailable(e.to_string()))?;
        self.private = content.binary.map(|binary| (text, binary));
        Ok(())
    }

    fn contents(&mut self) -> Result<ClipboardContent> {
        let mut clipboard = Self::open()?;
        let text = clipboard.get_text().ok();
        let binary = match (&self.private, &text) {
            (Some((tag, binary)), Some(text)) if tag == text => Some(binary.clone()),
            _ => None,
        };
        Ok(ClipboardContent { binary, text })
    }
}

// ============================================================================
// In-memory clipboard
// ============================================================================

/// Process-local clipboard for tests and headless hosts
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    content: ClipboardContent,
    unavailable: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &ClipboardContent {
        &self.content
    }

    /// Makes every access fail with `ClipboardUnavailable`
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    fn check(&self) -> Result<()> {
        if self.unavailable {
            Err(CodeAreaError::ClipboardUnavailable(
                "clipboard disabled".into(),
            ))
        } else {
            Ok(())
        }
    }
}

impl ClipboardProvider for MemoryClipboard {
    fn set_contents(&mut self, content: ClipboardContent) -> Result<()> {
        self.check()?;
        self.content = content;
        Ok(())
    }

    fn contents(&mut self) -> Result<ClipboardContent> {
        self.check()?;
        Ok(self.content.clone())
    }
}
