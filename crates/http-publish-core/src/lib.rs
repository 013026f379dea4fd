// # http-publish-core
//
// Core library for sending the contents of a markdown document to one of
// several configured HTTP endpoints ("destinations") and writing the metadata
// the server returns back into the document.
//
// ## Architecture Overview
//
// - **DestinationSettings**: Immutable, self-validating record for one publish target
// - **DestinationDraft**: Form-capture type that finalizes into a DestinationSettings
// - **PublishSettings**: Ordered list of destinations with add/remove/resolve
// - **PublishDispatcher**: Resolves a destination, builds the POST, decodes the reply
// - **Publisher**: Selection policy (none / single / multiple) around one publish action
// - **frontmatter**: Applies the server-supplied `path` to the document metadata block
//
// ## Collaborators
//
// Everything the host provides is a trait in [`traits`]:
// - **SettingsRepository**: load/save the destination list
// - **Document**: read the active document and edit single lines
// - **Notifier**: fire-and-forget user messages
// - **DestinationPrompt**: interactive destination picker
// - **Transport**: performs the HTTP request
//
// ## Design Principles
//
// 1. **Validate before persist**: destinations are checked at add time, trusted on load
// 2. **Explicit state**: callers pass the current settings; nothing is global
// 3. **Single attempt**: no retry, no queue, one request per user action
// 4. **No network code in core**: transports live in their own crates

pub mod destination;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod frontmatter;
pub mod publisher;
pub mod settings;
pub mod store;
pub mod traits;

// Re-export core types for convenience
pub use destination::{DestinationDraft, DestinationSettings};
pub use dispatch::{PublishDispatcher, PublishRequest, PublishResponse};
pub use document::{FileDocument, MemoryDocument};
pub use error::{Error, Result, ValidationError};
pub use frontmatter::{PathEdit, UpdateOutcome};
pub use publisher::{PublishOutcome, Publisher};
pub use settings::{PublishSettings, Selection, resolve_destination};
pub use store::{FileSettingsRepository, MemorySettingsRepository};
pub use traits::{DestinationPrompt, Document, Notice, Notifier, SettingsRepository, Transport};
