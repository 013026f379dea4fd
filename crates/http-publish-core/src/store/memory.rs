// # Memory Settings Repository
//
// In-memory implementation of SettingsRepository. Nothing survives the
// process; useful for tests and for embedding where the host persists
// settings itself.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::Error;
use crate::settings::PublishSettings;
use crate::traits::SettingsRepository;

/// In-memory settings repository
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsRepository {
    inner: Arc<RwLock<PublishSettings>>,
    saves: Arc<AtomicUsize>,
}

impl MemorySettingsRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository that already holds `settings`
    pub fn with_settings(settings: PublishSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
            saves: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of successful `save()` calls
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SettingsRepository for MemorySettingsRepository {
    async fn load(&self) -> Result<PublishSettings, Error> {
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, settings: &PublishSettings) -> Result<(), Error> {
        *self.inner.write().await = settings.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DestinationSettings;

    #[tokio::test]
    async fn test_memory_repository_roundtrip() {
        let repo = MemorySettingsRepository::new();
        assert!(repo.load().await.unwrap().is_empty());

        let mut settings = PublishSettings::new();
        settings
            .add(DestinationSettings::new(Some("a"), Some("http://a"), None, None))
            .unwrap();
        repo.save(&settings).await.unwrap();

        // Clones share state
        let other = repo.clone();
        assert_eq!(other.load().await.unwrap(), settings);
        assert_eq!(other.save_count(), 1);
    }
}
