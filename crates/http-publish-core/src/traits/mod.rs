//! Collaborator traits
//!
//! Everything the core needs from its host is expressed as a trait here.
//!
//! - [`SettingsRepository`]: Load and save the destination list
//! - [`Document`]: Read the active document and edit single lines
//! - [`Notifier`]: Fire-and-forget user notices
//! - [`DestinationPrompt`]: Interactive destination picker
//! - [`Transport`]: Send a publish request over HTTP

pub mod document;
pub mod notifier;
pub mod prompt;
pub mod settings_repository;
pub mod transport;

pub use document::Document;
pub use notifier::{Notice, Notifier};
pub use prompt::DestinationPrompt;
pub use settings_repository::SettingsRepository;
pub use transport::Transport;
