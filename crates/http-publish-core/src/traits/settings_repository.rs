// # Settings Repository Trait
//
// Defines the interface for persisting the destination list.
//
// ## Purpose
//
// The repository replaces an ambient, host-wide settings object. Callers
// load the state once, pass it around explicitly, and hand it back to
// `save()` after each mutation.
//
// ## Implementations
//
// - File-based: JSON file with atomic writes and backup recovery
// - Memory: for tests and embedding
//
// ## Usage
//
// ```rust,ignore
// use http_publish_core::{DestinationSettings, SettingsRepository};
//
// let mut settings = repo.load().await?;
// settings.add(DestinationSettings::new(Some("blog"), Some("https://example.org"), None, None))?;
// repo.save(&settings).await?;
// ```

use async_trait::async_trait;

use crate::settings::PublishSettings;

/// Trait for settings persistence
///
/// # Thread Safety
///
/// Implementations must be safe to share across async tasks. The core never
/// issues two saves concurrently, so no ordering guarantees beyond a single
/// `save()` being atomic are required.
///
/// ## Implementation Guidelines
///
/// - **Absent means empty**: `load()` on a fresh location returns default settings
/// - **Trust on load**: do not validate or normalise records when reading
/// - **Whole-state writes**: `save()` replaces everything previously stored
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Load the persisted settings
    ///
    /// # Returns
    ///
    /// - `Ok(PublishSettings)`: Stored settings, or empty settings if none exist
    /// - `Err(Error)`: Storage error
    async fn load(&self) -> Result<PublishSettings, crate::Error>;

    /// Persist the full settings state
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Successfully written
    /// - `Err(Error)`: Storage error
    async fn save(&self, settings: &PublishSettings) -> Result<(), crate::Error>;

    /// Human-readable location of the stored settings (for logs and messages)
    fn location(&self) -> String;
}
