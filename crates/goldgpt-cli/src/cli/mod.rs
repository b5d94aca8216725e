//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use goldgpt_core::config::Config;
use goldgpt_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "goldgpt")]
#[command(version)]
#[command(about = "Terminal client for the GoldGPT gold-investment assistant")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Backend base URL (overrides GOLDGPT_API_URL and the config file)
    #[arg(long, global = true, value_name = "BASE_URL")]
    url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Send one message and print the reply
    Send {
        /// The message to send
        #[arg(value_name = "MESSAGE")]
        message: String,

        /// Continue an existing session by ID
        #[arg(long, value_name = "ID")]
        session: Option<String>,
    },

    /// Manage stored chat sessions
    Sessions {
        #[command(subcommand)]
        command: SessionCommands,
    },

    /// Check that the backend is reachable
    Health,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand, Debug, PartialEq, Eq)]
enum SessionCommands {
    /// Lists stored sessions, newest first
    List,
    /// Shows the transcript of a session
    Show {
        #[arg(value_name = "SESSION_ID")]
        id: String,
    },
    /// Deletes a session
    Delete {
        #[arg(value_name = "SESSION_ID")]
        id: String,
    },
}

#[derive(clap::Subcommand, Debug, PartialEq, Eq)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Print a fresh config rendered from defaults
    Generate,
    /// Persist the backend base URL
    SetUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
}

/// Commands that talk to the backend. Chat is the default.
#[derive(Debug, PartialEq, Eq)]
enum BackendCommand {
    Chat,
    Send {
        message: String,
        session: Option<String>,
    },
    Sessions(SessionCommands),
    Health,
}

#[derive(Debug, PartialEq, Eq)]
enum Route {
    // Config commands must work even when the file on disk is broken.
    Config(ConfigCommands),
    Backend(BackendCommand),
}

fn route(command: Option<Commands>) -> Route {
    match command {
        Some(Commands::Config { command }) => Route::Config(command),
        None => Route::Backend(BackendCommand::Chat),
        Some(Commands::Send { message, session }) => {
            Route::Backend(BackendCommand::Send { message, session })
        }
        Some(Commands::Sessions { command }) => Route::Backend(BackendCommand::Sessions(command)),
        Some(Commands::Health) => Route::Backend(BackendCommand::Health),
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, url } = cli;

    match route(command) {
        Route::Config(command) => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
            ConfigCommands::SetUrl { url } => commands::config::set_url(&url),
        },
        Route::Backend(command) => dispatch_backend(command, url.as_deref()).await,
    }
}

async fn dispatch_backend(command: BackendCommand, url: Option<&str>) -> Result<()> {
    let config = Config::load().context("load config")?;
    let _logging = match logging::init(&config) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: file logging disabled: {e:#}");
            None
        }
    };
    let base_url = config.resolve_base_url(url)?;

    match command {
        BackendCommand::Chat => commands::chat::run(&config, &base_url).await,
        BackendCommand::Send { message, session } => {
            commands::send::run(&config, &base_url, &message, session.as_deref()).await
        }
        BackendCommand::Sessions(command) => match command {
            SessionCommands::List => commands::sessions::list(&config, &base_url).await,
            SessionCommands::Show { id } => commands::sessions::show(&config, &base_url, &id).await,
            SessionCommands::Delete { id } => {
                commands::sessions::delete(&config, &base_url, &id).await
            }
        },
        BackendCommand::Health => commands::health::run(&config, &base_url).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route_args(args: &[&str]) -> Route {
        let cli = Cli::try_parse_from(args).unwrap();
        route(cli.command)
    }

    #[test]
    fn no_subcommand_routes_to_chat() {
        assert_eq!(route_args(&["goldgpt"]), Route::Backend(BackendCommand::Chat));
    }

    #[test]
    fn config_commands_never_reach_the_backend() {
        assert_eq!(
            route_args(&["goldgpt", "config", "path"]),
            Route::Config(ConfigCommands::Path)
        );
        assert_eq!(
            route_args(&["goldgpt", "--url", "http://x", "config", "set-url", "http://y"]),
            Route::Config(ConfigCommands::SetUrl {
                url: "http://y".to_string()
            })
        );
    }

    #[test]
    fn send_keeps_message_and_session() {
        assert_eq!(
            route_args(&["goldgpt", "send", "Hello", "--session", "abc"]),
            Route::Backend(BackendCommand::Send {
                message: "Hello".to_string(),
                session: Some("abc".to_string()),
            })
        );
    }
}
