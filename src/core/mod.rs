pub mod constants;
pub mod controller;
pub mod conversation;
pub mod export;
pub mod inference;
pub mod message;
pub mod session;
pub mod text_wrapping;
