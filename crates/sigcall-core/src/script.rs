//! Script buffer behind the front-end's editor commands.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::Result;

/// In-memory script text with the usual editor operations.
#[derive(Debug, Default)]
pub struct ScriptBuffer {
    text: String,
}

impl ScriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Hand the script off for execution.
    ///
    /// The payload-side script runtime does not exist yet; until it does
    /// the text is logged verbatim, matching the front-end contract.
    pub fn execute(&self) {
        info!("Execute script:\n{}", self.text);
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn open(&mut self, path: &Path) -> Result<()> {
        self.text = fs::read_to_string(path)?;
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.lua");

        let mut buffer = ScriptBuffer::new();
        buffer.set_text("print('hi')");
        buffer.save(&path).unwrap();

        let mut loaded = ScriptBuffer::new();
        loaded.open(&path).unwrap();
        assert_eq!(loaded.text(), "print('hi')");
    }

    #[test]
    fn test_clear() {
        let mut buffer = ScriptBuffer::new();
        buffer.set_text("something");
        buffer.clear();
        assert_eq!(buffer.text(), "");
    }

    #[test]
    fn test_open_missing_file() {
        let mut buffer = ScriptBuffer::new();
        let err = buffer
            .open(Path::new("/definitely/not/here.lua"))
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
