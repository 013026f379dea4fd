// # http-publish - Markdown Publisher
//
// Thin command line host for http-publish-core:
//
// 1. Parse the command line
// 2. Initialize logging from the environment
// 3. Build the tokio runtime
// 4. Wire the settings file, reqwest transport and terminal collaborators
//    into the core and run one command
//
// ## Configuration
//
// - `--settings PATH` / `HTTP_PUBLISH_SETTINGS`: settings file
//   (default `<config dir>/http-publish/settings.json`)
// - `HTTP_PUBLISH_LOG_LEVEL`: trace, debug, info, warn, error (default warn)
//
// ## Example
//
// ```bash
// http-publish add --name blog --url https://example.org/pub \
//     --auth-header-name Authorization --auth-header-value "Bearer 12345"
// http-publish publish notes/today.md
// ```

mod cli;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use http_publish_core::store::{add_destination, delete_destination};
use http_publish_core::{
    DestinationDraft, Error, FileDocument, FileSettingsRepository, PublishDispatcher,
    PublishOutcome, Publisher, SettingsRepository,
};
use http_publish_reqwest::ReqwestTransport;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, debug, error, info};
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Command, SETTINGS_ENV};
use terminal::{DialoguerPrompt, TerminalNotifier};

/// Environment variable selecting the log level
const LOG_LEVEL_ENV: &str = "HTTP_PUBLISH_LOG_LEVEL";

/// Exit codes for the command line
///
/// - 0: Command completed (including an abandoned picker)
/// - 1: Configuration error (bad destination, missing settings, bad environment)
/// - 2: Runtime error (publish or storage failure)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PublishExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<PublishExitCode> for ExitCode {
    fn from(code: PublishExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Parse a log level name, defaulting to `warn`
fn parse_log_level(value: Option<&str>) -> Result<Level> {
    let Some(value) = value else {
        return Ok(Level::WARN);
    };

    match value.trim().to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "{} '{}' is not valid. Valid levels: trace, debug, info, warn, error",
            LOG_LEVEL_ENV,
            value
        ),
    }
}

/// Map a failed command to its exit code
fn exit_code_for(err: &anyhow::Error) -> PublishExitCode {
    match err.downcast_ref::<Error>() {
        Some(e) if e.is_configuration() => PublishExitCode::ConfigError,
        Some(Error::DestinationNotFound(_)) => PublishExitCode::ConfigError,
        Some(Error::Publish { source, .. })
            if matches!(**source, Error::DestinationNotFound(_)) =>
        {
            PublishExitCode::ConfigError
        }
        _ => PublishExitCode::RuntimeError,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match parse_log_level(env::var(LOG_LEVEL_ENV).ok().as_deref()) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return PublishExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return PublishExitCode::ConfigError.into();
    }

    let Some(settings_path) = cli.settings_path() else {
        eprintln!(
            "Configuration error: no config directory found. Pass --settings or set {}",
            SETTINGS_ENV
        );
        return PublishExitCode::ConfigError.into();
    };
    debug!("Using settings file {}", settings_path.display());

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return PublishExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(run(cli.command, settings_path));

    match result {
        Ok(()) => PublishExitCode::Success.into(),
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            exit_code_for(&e).into()
        }
    }
}

/// Run one command against the settings file at `settings_path`
async fn run(command: Command, settings_path: PathBuf) -> Result<()> {
    let repo = FileSettingsRepository::new(&settings_path).await?;
    let mut settings = repo
        .load()
        .await
        .with_context(|| format!("Failed to load settings from {}", repo.location()))?;

    match command {
        Command::List => {
            if settings.is_empty() {
                println!("No destinations configured.");
            }
            for destination in settings.destinations() {
                let name = destination.name().unwrap_or_default();
                let url = destination.url().unwrap_or_default();
                match destination.auth_header_name() {
                    Some(header) => println!("{}\t{}\t(auth: {})", name, url, header),
                    None => println!("{}\t{}", name, url),
                }
            }
        }

        Command::Add {
            name,
            url,
            auth_header_name,
            auth_header_value,
        } => {
            let mut draft = DestinationDraft::new();
            draft.set_name(name).set_url(url);
            if let Some(header) = auth_header_name {
                draft.set_auth_header_name(header);
            }
            if let Some(value) = auth_header_value {
                draft.set_auth_header_value(value);
            }

            let destination = draft.finalize().map_err(Error::from)?;
            let name = destination.name().unwrap_or_default().to_string();
            add_destination(&repo, &mut settings, destination).await?;
            info!("Added destination {}", name);
            println!("Added destination {}", name);
        }

        Command::Delete { name } => {
            if !delete_destination(&repo, &mut settings, &name).await? {
                return Err(Error::DestinationNotFound(name).into());
            }
            info!("Deleted destination {}", name);
            println!("Deleted destination {}", name);
        }

        Command::Publish { file, destination } => {
            let document = FileDocument::open(&file)?;
            let publisher = Publisher::new(
                PublishDispatcher::new(Box::new(ReqwestTransport::new())),
                Box::new(DialoguerPrompt),
                Box::new(TerminalNotifier),
            );

            match publisher
                .publish(&settings, &document, destination.as_deref())
                .await?
            {
                PublishOutcome::Published { destination, update, .. } => {
                    info!("Published {} to {} ({:?})", file.display(), destination, update);
                }
                PublishOutcome::Abandoned => {
                    info!("Publish of {} abandoned", file.display());
                }
            }
        }
    }

    Ok(())
}
