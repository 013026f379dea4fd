// # File Settings Repository
//
// File-based implementation of SettingsRepository with crash recovery.
//
// ## Crash Recovery
//
// - Atomic writes: Uses write-then-rename for atomicity
// - Corruption detection: Validates JSON on load
// - Automatic backup: Keeps .backup of the previous settings file
// - Recovery: Falls back to backup if corruption detected
//
// ## File Format
//
// ```json
// {
//   "version": "1.0",
//   "destinations": [
//     {
//       "name": "blog",
//       "url": "https://example.org/publish",
//       "authHeaderName": "Authorization",
//       "authHeaderValue": "Bearer 12345"
//     }
//   ]
// }
// ```
//
// `version` is optional on read, and a missing `destinations` key means an
// empty list.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::Error;
use crate::destination::DestinationSettings;
use crate::settings::PublishSettings;
use crate::traits::SettingsRepository;

/// Settings file format version
const SETTINGS_FILE_VERSION: &str = "1.0";

/// File-based settings repository with crash recovery
///
/// # Example
///
/// ```rust,no_run
/// use http_publish_core::{DestinationSettings, FileSettingsRepository, SettingsRepository};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let repo = FileSettingsRepository::new("/home/me/.config/http-publish/settings.json").await?;
///
///     let mut settings = repo.load().await?;
///     settings.add(DestinationSettings::new(Some("blog"), Some("https://example.org"), None, None))?;
///     repo.save(&settings).await?;
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileSettingsRepository {
    path: PathBuf,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct SettingsFileFormat {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    destinations: Vec<DestinationSettings>,
}

/// Why a settings file could not be loaded
enum LoadFailure {
    /// File exists but could not be read
    Unreadable(Error),
    /// File was read but is not valid settings JSON
    Corrupt(Error),
}

impl FileSettingsRepository {
    /// Create a repository backed by `path`
    ///
    /// Creates the parent directory if needed. The file itself is only
    /// written on the first `save()`.
    pub async fn new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).await.map_err(|e| {
                Error::settings_store(format!(
                    "Failed to create settings directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        Ok(Self { path })
    }

    /// Path of the settings file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read one settings file
    ///
    /// An absent file yields empty settings.
    async fn read_file(path: &Path) -> Result<PublishSettings, LoadFailure> {
        if !path.exists() {
            tracing::debug!("Settings file does not exist: {}", path.display());
            return Ok(PublishSettings::new());
        }

        let content = fs::read_to_string(path).await.map_err(|e| {
            LoadFailure::Unreadable(Error::settings_store(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            )))
        })?;

        let file: SettingsFileFormat = serde_json::from_str(&content).map_err(|e| {
            LoadFailure::Corrupt(Error::settings_store(format!(
                "Failed to parse settings file {}: {}",
                path.display(),
                e
            )))
        })?;

        if let Some(version) = &file.version
            && version != SETTINGS_FILE_VERSION
        {
            tracing::warn!(
                "Settings file version mismatch: expected {}, got {}. Attempting to load anyway.",
                SETTINGS_FILE_VERSION,
                version
            );
        }

        Ok(PublishSettings::from_destinations(file.destinations))
    }

    /// Load with fallback to the backup file when the main file is corrupt
    async fn load_with_recovery(&self) -> Result<PublishSettings, Error> {
        let error = match Self::read_file(&self.path).await {
            Ok(settings) => {
                tracing::debug!("Loaded {} destination(s) from {}", settings.len(), self.path.display());
                return Ok(settings);
            }
            Err(LoadFailure::Unreadable(e)) => return Err(e),
            Err(LoadFailure::Corrupt(e)) => e,
        };

        tracing::warn!("Settings file appears corrupted: {}. Attempting recovery from backup.", error);

        let backup_path = Self::backup_path(&self.path);
        if !backup_path.exists() {
            tracing::warn!("No backup file found. Starting with empty settings.");
            return Ok(PublishSettings::new());
        }

        match Self::read_file(&backup_path).await {
            Ok(settings) => {
                tracing::info!("Recovered settings from backup: {} destination(s)", settings.len());
                if let Err(e) = fs::copy(&backup_path, &self.path).await {
                    tracing::error!("Failed to restore settings file from backup: {}", e);
                }
                Ok(settings)
            }
            Err(LoadFailure::Unreadable(e)) | Err(LoadFailure::Corrupt(e)) => {
                tracing::error!("Backup also unusable: {}. Starting with empty settings.", e);
                Ok(PublishSettings::new())
            }
        }
    }

    /// Write settings atomically (temp file, backup, rename)
    async fn write_file(&self, settings: &PublishSettings) -> Result<(), Error> {
        let file = SettingsFileFormat {
            version: Some(SETTINGS_FILE_VERSION.to_string()),
            destinations: settings.destinations().to_vec(),
        };

        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| Error::settings_store(format!("Failed to serialize settings: {}", e)))?;

        let temp_path = self.temp_path();
        {
            let mut out = fs::File::create(&temp_path).await.map_err(|e| {
                Error::settings_store(format!(
                    "Failed to create temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            out.write_all(json.as_bytes()).await.map_err(|e| {
                Error::settings_store(format!(
                    "Failed to write to temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            out.flush().await.map_err(|e| {
                Error::settings_store(format!(
                    "Failed to flush temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
        }

        if self.path.exists() {
            let backup_path = Self::backup_path(&self.path);
            if let Err(e) = fs::copy(&self.path, &backup_path).await {
                tracing::warn!("Failed to create backup: {}", e);
            }
        }

        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            Error::settings_store(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        tracing::trace!("Settings written to file: {}", self.path.display());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone();
        temp.set_extension("tmp");
        temp
    }

    fn backup_path(path: &Path) -> PathBuf {
        let mut backup = path.to_path_buf();
        backup.set_extension("backup");
        backup
    }
}

#[async_trait]
impl SettingsRepository for FileSettingsRepository {
    async fn load(&self) -> Result<PublishSettings, Error> {
        self.load_with_recovery().await
    }

    async fn save(&self, settings: &PublishSettings) -> Result<(), Error> {
        self.write_file(settings).await
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
