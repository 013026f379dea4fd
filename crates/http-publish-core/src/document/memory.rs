// # Memory Document
//
// In-memory Document, shared between clones. Used by tests and by hosts
// that hand the core a buffer rather than a file.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::Error;
use crate::traits::Document;

/// In-memory document
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    id: String,
    text: Arc<RwLock<String>>,
}

impl MemoryDocument {
    /// Create a document called `id` holding `text`
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: Arc::new(RwLock::new(text.into())),
        }
    }

    /// Current content
    pub async fn text(&self) -> String {
        self.text.read().await.clone()
    }
}

#[async_trait]
impl Document for MemoryDocument {
    fn id(&self) -> &str {
        &self.id
    }

    async fn read(&self) -> Result<String, Error> {
        Ok(self.text.read().await.clone())
    }

    async fn insert_line(&self, line: usize, text: &str) -> Result<(), Error> {
        let mut guard = self.text.write().await;
        *guard = super::insert_line(&guard, line, text)?;
        Ok(())
    }

    async fn replace_line(&self, line: usize, text: &str) -> Result<(), Error> {
        let mut guard = self.text.write().await;
        *guard = super::replace_line(&guard, line, text)?;
        Ok(())
    }
}
