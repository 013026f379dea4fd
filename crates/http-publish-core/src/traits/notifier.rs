// # Notifier Trait
//
// User-facing messages. Notification is fire-and-forget: implementations
// must not fail and the core never waits on the user.

/// A message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// No destination is configured
    NoDestinations,
    /// The document was published
    Published {
        destination: String,
        path: Option<String>,
    },
    /// Sending to the destination failed
    SendFailed { destination: String },
    /// The server accepted the document but the local update failed
    UpdateFailed { destination: String },
    /// A publish is already running
    Busy,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::NoDestinations => {
                write!(f, "Please set up a destination first in the settings.")
            }
            Notice::Published {
                destination,
                path: Some(path),
            } => write!(f, "Published to {} as {}", destination, path),
            Notice::Published { destination, .. } => write!(f, "Published to {}", destination),
            Notice::SendFailed { .. } => write!(f, "Failed to send data to destination"),
            Notice::UpdateFailed { destination } => write!(
                f,
                "Published to {}, but the document could not be updated",
                destination
            ),
            Notice::Busy => write!(f, "A publish is already in progress"),
        }
    }
}

/// Trait for user notification
pub trait Notifier: Send + Sync {
    /// Show `notice` to the user
    fn notify(&self, notice: Notice);
}
