//! Terminal UI layer for interactive chat sessions.
//!
//! - [`chat_loop`]: the interaction loop that feeds input to
//!   [`crate::core::controller::ChatController`] and redraws on request.
//! - [`view`]: the owned snapshot of session state that a frame is drawn from.
//! - [`renderer`]: frame layout (settings sidebar, transcript, input, status).
//!
//! This layer presents and captures interaction state; [`crate::core`] owns
//! the session and the server exchange.

pub mod chat_loop;
pub mod renderer;
pub mod view;
