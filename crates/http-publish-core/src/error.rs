//! Error types for the publish system
//!
//! [`ValidationError`] covers a malformed destination record and is raised
//! synchronously from `validate()`. Everything else flows through [`Error`].

use thiserror::Error;

/// Result type alias for publish operations
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a destination record is not usable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name absent or blank
    #[error("Name is required")]
    MissingName,

    /// URL absent or blank
    #[error("URL is required")]
    MissingUrl,

    /// URL present but not parseable as an absolute URL
    #[error("URL is invalid: {url} ({reason})")]
    InvalidUrl {
        /// The rejected URL
        url: String,
        /// Parser message
        reason: String,
    },

    /// Authorization header value set without a header name
    #[error("Authorization header name is required if an authorization header value is set")]
    MissingAuthName,
}

/// Core error type for the publish system
#[derive(Error, Debug)]
pub enum Error {
    /// Destination failed validation
    #[error("Invalid destination: {0}")]
    Validation(#[from] ValidationError),

    /// A destination with this name is already configured
    #[error("Destination already exists: {0}")]
    DuplicateDestination(String),

    /// No configured destination has this name
    #[error("Destination not found: {0}")]
    DestinationNotFound(String),

    /// The destination list is empty
    #[error("No destinations configured. Add a destination first.")]
    NoDestinations,

    /// Another publish action is still running
    #[error("A publish is already in progress")]
    PublishInProgress,

    /// Sending to a destination failed (resolution, transport or decoding)
    #[error("Failed to send to destination {destination}: {source}")]
    Publish {
        /// Destination name the action targeted
        destination: String,
        /// Underlying cause
        #[source]
        source: Box<Error>,
    },

    /// The request went through but the document could not be updated
    #[error("Failed to update document: {0}")]
    Update(String),

    /// HTTP transport errors
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Document read/write errors
    #[error("Document error: {0}")]
    Document(String),

    /// Settings repository errors
    #[error("Settings store error: {0}")]
    SettingsStore(String),

    /// Prompt errors (terminal unavailable, etc.)
    #[error("Prompt error: {0}")]
    Prompt(String),
}

impl Error {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an invalid response error
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create a document error
    pub fn document(msg: impl Into<String>) -> Self {
        Self::Document(msg.into())
    }

    /// Create a settings store error
    pub fn settings_store(msg: impl Into<String>) -> Self {
        Self::SettingsStore(msg.into())
    }

    /// Create a prompt error
    pub fn prompt(msg: impl Into<String>) -> Self {
        Self::Prompt(msg.into())
    }

    /// Create an update error
    pub fn update(msg: impl Into<String>) -> Self {
        Self::Update(msg.into())
    }

    /// Wrap a failure as a publish error for `destination`
    pub fn publish(destination: impl Into<String>, source: Error) -> Self {
        Self::Publish {
            destination: destination.into(),
            source: Box::new(source),
        }
    }

    /// Whether this is a configuration-time error (bad or conflicting destination)
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::DuplicateDestination(_) | Self::NoDestinations
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_error_keeps_cause() {
        let err = Error::publish("d", Error::DestinationNotFound("d".to_string()));
        assert_eq!(
            err.to_string(),
            "Failed to send to destination d: Destination not found: d"
        );

        let source = std::error::Error::source(&err).expect("cause is chained");
        assert_eq!(source.to_string(), "Destination not found: d");
    }

    #[test]
    fn configuration_errors_are_classified() {
        assert!(Error::from(ValidationError::MissingName).is_configuration());
        assert!(Error::DuplicateDestination("a".into()).is_configuration());
        assert!(!Error::transport("boom").is_configuration());
    }
}
