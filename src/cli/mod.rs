//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod model_list;
pub mod say;

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use directories::UserDirs;
use tracing::debug;

use crate::cli::model_list::list_models;
use crate::cli::say::run_say;
use crate::core::constants::{DEFAULT_MODEL, HOST_ENV_VAR};
use crate::ui::chat_loop::{run_chat, ChatOptions};
use crate::utils::logging::{init_tracing, LogTarget};
use crate::utils::url::resolve_base_url;

#[derive(Parser)]
#[command(name = "lochat", version)]
#[command(about = "A terminal chat interface for a local Ollama server")]
#[command(
    long_about = "lochat is a full-screen terminal chat interface for language models served \
by a local Ollama instance. Each message is sent as a single request and the complete \
reply is shown once it arrives.\n\n\
Environment Variables:\n\
  OLLAMA_HOST       Server address (optional, defaults to http://localhost:11434)\n\
  RUST_LOG          Log filter for --log-file output (defaults to info)\n\n\
Controls:\n\
  Enter             Send the message\n\
  Alt+Enter         Insert a new line\n\
  Ctrl+N / Ctrl+P   Select the next / previous model\n\
  Ctrl+L            Reset the conversation\n\
  Ctrl+E            Export the conversation to a text file\n\
  PgUp/PgDn/Mouse   Scroll through chat history\n\
  Ctrl+C            Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model to chat with
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Server address, e.g. localhost:11434 or http://gpu-box:11434
    #[arg(long, global = true, value_name = "URL")]
    pub host: Option<String>,

    /// Directory exported conversations are written to (defaults to Downloads)
    #[arg(long, global = true, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Write diagnostic logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Send a single prompt and print the reply
    Say {
        /// Prompt text; multiple words are joined with spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// List the selectable models
    Models,
}

/// The user's download directory, or the working directory when the platform
/// does not report one.
pub fn default_export_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let command = args.command.unwrap_or(Commands::Chat);

    let env_host = std::env::var(HOST_ENV_VAR).ok();
    let base_url = resolve_base_url(args.host.as_deref(), env_host.as_deref());
    let model = args.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());

    match command {
        Commands::Chat => {
            init_tracing(&LogTarget::for_interactive(args.log_file))?;
            let export_dir = args.export_dir.unwrap_or_else(default_export_dir);
            debug!(export_dir = %export_dir.display(), "Resolved export directory");
            run_chat(ChatOptions {
                base_url,
                model,
                export_dir,
            })
            .await
        }
        Commands::Say { prompt } => {
            init_tracing(&LogTarget::for_one_shot(args.log_file))?;
            run_say(prompt, &model, &base_url).await
        }
        Commands::Models => {
            let mut stdout = std::io::stdout();
            list_models(&model, &mut stdout)?;
            Ok(())
        }
    }
}
