//! lochat is a terminal chat client for a language model served by a local
//! Ollama instance.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the session: turns, model selection, the request/response
//!   exchange with the server, and conversation export.
//! - [`ui`] renders the terminal interface and runs the interactive event loop.
//! - [`cli`] parses arguments, sets up logging, and dispatches to the chat UI
//!   or the one-shot commands.
//! - [`api`] defines the JSON payloads of the generate endpoint.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
