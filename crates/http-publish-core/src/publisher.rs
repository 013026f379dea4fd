//! Publish action
//!
//! The [`Publisher`] runs one user-initiated publish from start to finish:
//!
//! ```text
//!            ┌──────────────┐
//!  publish ─▶│ in-flight    │── busy ──▶ Notice::Busy
//!            │ guard        │
//!            └──────┬───────┘
//!                   ▼
//!            ┌──────────────┐
//!            │ selection    │── NONE ──▶ Notice::NoDestinations
//!            │ policy       │── MULTIPLE ─▶ DestinationPrompt ── abandoned ─▶ Abandoned
//!            └──────┬───────┘
//!                   ▼ SINGLE / picked
//!            ┌──────────────┐
//!            │ dispatch     │── error ─▶ Notice::SendFailed
//!            └──────┬───────┘
//!                   ▼
//!            ┌──────────────┐
//!            │ frontmatter  │── error ─▶ Notice::UpdateFailed
//!            └──────┬───────┘
//!                   ▼
//!            Notice::Published
//! ```
//!
//! Every error is terminal for the action. Nothing is retried; the user
//! triggers the action again.

use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::dispatch::{PublishDispatcher, PublishResponse};
use crate::error::{Error, Result};
use crate::frontmatter::{self, UpdateOutcome};
use crate::settings::{PublishSettings, Selection};
use crate::traits::{DestinationPrompt, Document, Notice, Notifier};

/// How a publish action ended when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The document was sent and the response applied
    Published {
        destination: String,
        path: Option<String>,
        update: UpdateOutcome,
    },
    /// The user closed the picker; nothing was sent
    Abandoned,
}

/// Orchestrates publish actions
pub struct Publisher {
    dispatcher: PublishDispatcher,
    prompt: Box<dyn DestinationPrompt>,
    notifier: Box<dyn Notifier>,
    in_flight: Mutex<()>,
}

impl Publisher {
    pub fn new(
        dispatcher: PublishDispatcher,
        prompt: Box<dyn DestinationPrompt>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            dispatcher,
            prompt,
            notifier,
            in_flight: Mutex::new(()),
        }
    }

    /// Publish `document` to a destination from `settings`
    ///
    /// # Parameters
    ///
    /// - `settings`: Current destination list (read-only during the action)
    /// - `document`: The document to send and update
    /// - `destination`: Name chosen up front; skips the picker but is still
    ///   resolved against `settings`
    ///
    /// # Errors
    ///
    /// - `Error::PublishInProgress`: another action holds the guard
    /// - `Error::NoDestinations`: nothing configured
    /// - `Error::Publish`: the request could not be sent or decoded
    /// - `Error::Update`: the request succeeded but the document was not updated
    pub async fn publish(
        &self,
        settings: &PublishSettings,
        document: &dyn Document,
        destination: Option<&str>,
    ) -> Result<PublishOutcome> {
        let Ok(_guard) = self.in_flight.try_lock() else {
            warn!("Publish requested for {} while another is in flight", document.id());
            self.notifier.notify(Notice::Busy);
            return Err(Error::PublishInProgress);
        };

        let name = match destination {
            Some(name) => name.to_string(),
            None => match self.select(settings).await? {
                Some(name) => name,
                None => {
                    info!("Destination picker abandoned for {}", document.id());
                    return Ok(PublishOutcome::Abandoned);
                }
            },
        };

        self.dispatch(settings, document, &name).await
    }

    /// Apply the selection policy
    ///
    /// Returns `Ok(None)` when the user abandons the picker.
    async fn select(&self, settings: &PublishSettings) -> Result<Option<String>> {
        match settings.selection() {
            Selection::None => {
                self.notifier.notify(Notice::NoDestinations);
                Err(Error::NoDestinations)
            }
            Selection::Single(name) => Ok(Some(name)),
            Selection::Multiple(names) => self.prompt.pick(&names, 0).await,
        }
    }

    async fn send(
        &self,
        settings: &PublishSettings,
        document: &dyn Document,
        name: &str,
    ) -> Result<PublishResponse> {
        let content = document.read().await?;
        self.dispatcher
            .publish(settings.destinations(), name, &content)
            .await
    }

    async fn dispatch(
        &self,
        settings: &PublishSettings,
        document: &dyn Document,
        name: &str,
    ) -> Result<PublishOutcome> {
        info!("Publishing {} to {}", document.id(), name);

        let response = match self.send(settings, document, name).await {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to publish {} to {}: {}", document.id(), name, e);
                self.notifier.notify(Notice::SendFailed {
                    destination: name.to_string(),
                });
                return Err(e);
            }
        };

        // The server has the document from here on, even if the update fails
        let update = match frontmatter::apply_response(document, &response).await {
            Ok(update) => update,
            Err(e) => {
                error!("Published {} to {} but could not update it: {}", document.id(), name, e);
                self.notifier.notify(Notice::UpdateFailed {
                    destination: name.to_string(),
                });
                return Err(e);
            }
        };

        self.notifier.notify(Notice::Published {
            destination: name.to_string(),
            path: response.path.clone(),
        });

        Ok(PublishOutcome::Published {
            destination: name.to_string(),
            path: response.path,
            update,
        })
    }
}
