// # Terminal Collaborators
//
// Prompt and notifier implementations for an interactive terminal.
//
// - `DialoguerPrompt` shows a `dialoguer::Select` list; Esc or `q` abandons
// - `TerminalNotifier` prints successes to stdout and problems to stderr

use async_trait::async_trait;
use dialoguer::Select;
use http_publish_core::traits::{DestinationPrompt, Notice, Notifier};
use http_publish_core::{Error, Result};

/// Destination picker backed by `dialoguer`
#[derive(Debug, Clone, Default)]
pub struct DialoguerPrompt;

#[async_trait]
impl DestinationPrompt for DialoguerPrompt {
    async fn pick(&self, names: &[String], default: usize) -> Result<Option<String>> {
        if names.is_empty() {
            return Ok(None);
        }

        let items = names.to_vec();
        let default = default.min(items.len() - 1);

        // dialoguer blocks on terminal input
        let picked = tokio::task::spawn_blocking(move || {
            Select::new()
                .with_prompt("Publish to which destination?")
                .items(&items)
                .default(default)
                .interact_opt()
                .map(|choice| choice.and_then(|index| items.get(index).cloned()))
        })
        .await
        .map_err(|e| Error::prompt(format!("Prompt task failed: {}", e)))?
        .map_err(|e| Error::prompt(e.to_string()))?;

        Ok(picked)
    }
}

/// Prints notices for the user
#[derive(Debug, Clone, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Published { .. } => println!("{}", notice),
            _ => eprintln!("{}", notice),
        }
    }
}
