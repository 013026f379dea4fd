//! Command line definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "HTTP_PUBLISH_SETTINGS";

#[derive(Parser, Debug)]
#[command(name = "http-publish")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (default: <config dir>/http-publish/settings.json)
    #[arg(long, global = true, env = SETTINGS_ENV, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List configured destinations
    List,

    /// Add a destination
    Add {
        /// Unique destination name
        #[arg(long)]
        name: String,

        /// Absolute URL the document is POSTed to
        #[arg(long)]
        url: String,

        /// Header carrying credentials, e.g. Authorization
        #[arg(long)]
        auth_header_name: Option<String>,

        /// Value for the credentials header
        #[arg(long)]
        auth_header_value: Option<String>,
    },

    /// Delete every destination with this name
    Delete {
        /// Destination name (exact match)
        name: String,
    },

    /// Publish a markdown file
    Publish {
        /// Document to send
        file: PathBuf,

        /// Destination to use instead of asking
        #[arg(short, long)]
        destination: Option<String>,
    },
}

impl Cli {
    /// Settings file to use, falling back to the per-user config directory
    pub fn settings_path(&self) -> Option<PathBuf> {
        self.settings.clone().or_else(default_settings_path)
    }
}

/// `<config dir>/http-publish/settings.json`, if the platform has a config dir
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("http-publish").join("settings.json"))
}
