//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;

use crate::core::config::data::{mask_secret, path_display};
use crate::core::config::{Config, ConfigError, ConfigKey};
use crate::ui::chat_loop::{run_chat, ChatLaunch};
use crate::utils::logging::init_file_logging;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_DESCRIBE"),
    ", built ",
    env!("VERGEN_BUILD_DATE"),
    ")"
);

#[derive(Parser)]
#[command(name = "minichat")]
#[command(version = VERSION)]
#[command(about = "A small frameless chat window for OpenAI-compatible APIs")]
#[command(
    long_about = "minichat draws a floating chat window inside your terminal and sends the \
whole conversation to an OpenAI-compatible chat completion endpoint on every message.\n\n\
Credentials:\n\
  The API key is read from the config file, or from OPENAI_API_KEY when set.\n\
  On first run a config file with a placeholder key is created; edit it or use\n\
  'minichat set api-key <key>'.\n\n\
Controls:\n\
  Enter             Send the message\n\
  Shift/Alt+Enter   Insert a new line\n\
  Up/Down/PgUp/PgDn Scroll through chat history (mouse wheel works too)\n\
  Up/Down           Move the cursor when the message has several lines\n\
  Drag title bar    Move the window; drag the bottom-right corner to resize\n\
  F11               Maximize or restore the window (when enabled)\n\
  Esc, Ctrl+C       Quit"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Model to use for this session only
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Write diagnostic logs to the given file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Open the chat window (default)
    Chat,
    /// Show the config file location and current values
    Config,
    /// Set a configuration value
    Set {
        /// One of: api-key, model, base-url, assistant-name, title
        key: String,
        /// Value to set (multiple words are joined with spaces)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Reset a configuration value to its default
    Unset {
        /// One of: api-key, model, base-url, assistant-name, title
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if let Some(log_path) = &args.log {
        init_file_logging(log_path)?;
    }

    let config_path = match args.config.clone() {
        Some(path) => path,
        None => Config::default_path()?,
    };

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => launch_chat(&config_path, args.model).await,
        Commands::Config => {
            let config = Config::load_from_path(&config_path)?;
            println!("Config file: {}", path_display(&config_path));
            config.print_all();
            Ok(())
        }
        Commands::Set { key, value } => {
            let mut config = Config::load_from_path(&config_path)?;
            match set_value(&mut config, &key, &value) {
                Ok(message) => {
                    config.save_to_path(&config_path)?;
                    println!("{message}");
                    Ok(())
                }
                Err(message) => fail(&message),
            }
        }
        Commands::Unset { key } => {
            let mut config = Config::load_from_path(&config_path)?;
            match unset_value(&mut config, &key) {
                Ok(message) => {
                    config.save_to_path(&config_path)?;
                    println!("{message}");
                    Ok(())
                }
                Err(message) => fail(&message),
            }
        }
    }
}

async fn launch_chat(config_path: &Path, model: Option<String>) -> Result<(), Box<dyn Error>> {
    let config = Config::load_or_create(config_path)?;
    let api_key = match config.resolve_api_key(config_path) {
        Ok(key) => key,
        Err(err @ ConfigError::MissingCredential { .. }) => return fail(&err.to_string()),
        Err(err) => return Err(err.into()),
    };
    info!(config = %path_display(config_path), "starting chat");

    run_chat(
        config,
        ChatLaunch {
            api_key,
            model_override: model,
        },
    )
    .await
}

fn fail(message: &str) -> Result<(), Box<dyn Error>> {
    eprintln!("❌ {message}");
    std::process::exit(1);
}

fn valid_keys() -> String {
    ConfigKey::ALL
        .iter()
        .map(|key| key.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_key(key: &str) -> Result<ConfigKey, String> {
    ConfigKey::parse(key)
        .ok_or_else(|| format!("Unknown config key '{key}'. Valid keys: {}", valid_keys()))
}

/// Apply `minichat set`. Returns the confirmation to print.
pub(crate) fn set_value(config: &mut Config, key: &str, value: &[String]) -> Result<String, String> {
    let key = parse_key(key)?;
    let value = value.join(" ").trim().to_string();
    if value.is_empty() {
        return Err(format!("Missing value for '{}'", key.as_str()));
    }

    let shown = match key {
        ConfigKey::ApiKey => mask_secret(&value),
        _ => value.clone(),
    };
    config.set(key, value);
    Ok(format!("✅ Set {} to: {shown}", key.as_str()))
}

/// Apply `minichat unset`. Returns the confirmation to print.
pub(crate) fn unset_value(config: &mut Config, key: &str) -> Result<String, String> {
    let key = parse_key(key)?;
    config.unset(key);
    Ok(format!("✅ Unset {}", key.as_str()))
}
