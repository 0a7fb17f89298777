//! Telegram Bot API client core.
//!
//! Decodes Bot API responses into a typed object graph (updates, messages,
//! chats, users, documents, entities) and builds outgoing requests. The HTTP
//! exchange itself sits behind the [`transport::Transport`] port, implemented
//! in `tgbot-http`.

pub mod bot;
pub mod config;
mod decode;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod model;
pub mod transport;

pub use bot::Bot;
pub use errors::{EntityTypeError, Error, Result};
