//! Typed views over Bot API payloads.

mod batch;
mod chat;
mod document;
mod entity;
mod message;
mod update;
mod user;

pub use batch::UpdateBatch;
pub use chat::{Chat, ChatType};
pub use document::Document;
pub use entity::MessageEntity;
pub use message::Message;
pub use update::{Update, UpdateKind};
pub use user::User;
