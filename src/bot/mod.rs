//! Telegram surface: command parsing, replies, dispatcher

pub mod commands;
pub mod responder;
pub mod runner;

pub use commands::Command;
pub use responder::{CommandResponder, Reply};
