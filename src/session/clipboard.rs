//! Clipboard port used for exporting and importing game state text.

use super::error::ClipboardError;

/// A text clipboard.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
    fn read_text(&mut self) -> Result<String, ClipboardError>;
}

/// In-memory clipboard.
///
/// `overwrite_next_read` simulates another instance writing between our
/// write and read-back; `unavailable` makes every call fail.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    contents: String,
    pending: Option<String>,
    unavailable: bool,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that refuses all access.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Replace the contents right after the next write.
    pub fn overwrite_next_read(&mut self, text: impl Into<String>) {
        self.pending = Some(text.into());
    }

    #[must_use]
    pub fn contents(&self) -> &str {
        &self.contents
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.unavailable {
            return Err(ClipboardError::new("clipboard unavailable"));
        }
        self.contents = self.pending.take().unwrap_or_else(|| text.to_string());
        Ok(())
    }

    fn read_text(&mut self) -> Result<String, ClipboardError> {
        if self.unavailable {
            return Err(ClipboardError::new("clipboard unavailable"));
        }
        Ok(self.contents.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let mut clip = MemoryClipboard::new();
        clip.write_text("hello").unwrap();
        assert_eq!(clip.read_text().unwrap(), "hello");
    }

    #[test]
    fn test_overwrite_next_read() {
        let mut clip = MemoryClipboard::new();
        clip.overwrite_next_read("other");
        clip.write_text("mine").unwrap();
        assert_eq!(clip.read_text().unwrap(), "other");

        clip.write_text("mine").unwrap();
        assert_eq!(clip.read_text().unwrap(), "mine");
    }

    #[test]
    fn test_unavailable() {
        let mut clip = MemoryClipboard::unavailable();
        assert!(clip.write_text("x").is_err());
        assert!(clip.read_text().is_err());
    }
}
