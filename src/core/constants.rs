//! Shared constants used across the application

use std::time::Duration;

/// Base URL of a local Ollama server when neither `--host` nor
/// `OLLAMA_HOST` is given.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Environment variable consulted for the server base URL.
pub const HOST_ENV_VAR: &str = "OLLAMA_HOST";

/// Path of the one-shot generation endpoint, relative to the base URL.
pub const GENERATE_ENDPOINT: &str = "api/generate";

pub const DEFAULT_MODEL: &str = "llama3.2";

/// Models offered in the settings sidebar, in display order.
pub const AVAILABLE_MODELS: &[&str] = &["llama3.2", "llama3", "mistral", "codellama", "deepseek-r1"];

/// Upper bound on a single generate call. Local models can be slow to load.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub const UNREACHABLE_MESSAGE: &str =
    "Error: Cannot connect to Ollama. Make sure Ollama is running (run 'ollama serve' in terminal)";

/// Format used for turn timestamps.
pub const TURN_TIMESTAMP_FORMAT: &str = "%H:%M:%S";
