// # Document Trait
//
// The active document as seen by the core: full-text read plus single-line
// edits. Line indices are zero-based and refer to lines split on '\n'.

use async_trait::async_trait;

/// Trait for the document being published
#[async_trait]
pub trait Document: Send + Sync {
    /// Identifier for logs (file path, note id, ...)
    fn id(&self) -> &str;

    /// Full text content, unmodified
    async fn read(&self) -> Result<String, crate::Error>;

    /// Insert `text` as a new line so that it ends up at `line`
    ///
    /// `line` equal to the current line count appends. `text` may hold
    /// several '\n'-separated lines; they are inserted in one write.
    async fn insert_line(&self, line: usize, text: &str) -> Result<(), crate::Error>;

    /// Overwrite the existing line at `line` with `text`
    async fn replace_line(&self, line: usize, text: &str) -> Result<(), crate::Error>;
}
