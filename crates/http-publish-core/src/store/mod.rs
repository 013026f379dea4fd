// # Settings Repository Implementations
//
// Implementations of the SettingsRepository trait, plus the add/delete
// helpers that apply one mutation and persist it.

pub mod file;
pub mod memory;

pub use file::FileSettingsRepository;
pub use memory::MemorySettingsRepository;

use crate::destination::DestinationSettings;
use crate::error::Result;
use crate::settings::PublishSettings;
use crate::traits::SettingsRepository;

/// Validate and append a destination, then persist
///
/// `settings` only changes if both the add and the save succeed, so an
/// invalid or duplicate destination is never written.
pub async fn add_destination(
    repo: &dyn SettingsRepository,
    settings: &mut PublishSettings,
    destination: DestinationSettings,
) -> Result<()> {
    let mut next = settings.clone();
    next.add(destination)?;
    repo.save(&next).await?;
    *settings = next;
    Ok(())
}

/// Remove every destination called `name`, then persist
///
/// Returns `Ok(false)` without writing when nothing matched.
pub async fn delete_destination(
    repo: &dyn SettingsRepository,
    settings: &mut PublishSettings,
    name: &str,
) -> Result<bool> {
    let mut next = settings.clone();
    if !next.remove(name) {
        return Ok(false);
    }
    repo.save(&next).await?;
    *settings = next;
    Ok(true)
}
