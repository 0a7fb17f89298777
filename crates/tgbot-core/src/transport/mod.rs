//! The HTTP boundary: a transport port plus the pure request builders that
//! feed it.

pub mod port;
pub mod requests;

pub use port::Transport;
pub use requests::{DeleteWebhook, GetUpdates, SendMessage};
