// # Destination Prompt Trait
//
// Interactive picker used when more than one destination is configured.

use async_trait::async_trait;

/// Trait for asking the user which destination to publish to
#[async_trait]
pub trait DestinationPrompt: Send + Sync {
    /// Present `names` and wait for a choice
    ///
    /// # Parameters
    ///
    /// - `names`: Destination names, in list order
    /// - `default`: Index preselected in the picker
    ///
    /// # Returns
    ///
    /// - `Ok(Some(name))`: The user confirmed a destination
    /// - `Ok(None)`: The user abandoned the picker; nothing is sent
    /// - `Err(Error)`: The prompt could not be shown
    async fn pick(&self, names: &[String], default: usize) -> Result<Option<String>, crate::Error>;
}
