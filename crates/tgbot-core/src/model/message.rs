use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    decode,
    errors::EntityTypeError,
    model::{Chat, Document, MessageEntity, User},
    Result,
};

/// `ctime(3)` layout, e.g. `Sun Sep 12 20:42:38 2021`.
const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// A message, channel post, or an edited version of either.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub message_id: Option<i64>,
    /// Absent for channel posts.
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub chat: Option<Chat>,
    #[serde(default, deserialize_with = "decode::null_default")]
    pub text: String,
    /// Unix timestamp.
    #[serde(default, deserialize_with = "decode::null_default")]
    pub date: i64,
    #[serde(default)]
    pub document: Option<Document>,
    #[serde(default, deserialize_with = "decode::null_default")]
    pub entities: Vec<MessageEntity>,
    #[serde(default, deserialize_with = "decode::null_default")]
    pub caption: String,
    #[serde(default, deserialize_with = "decode::null_default")]
    pub caption_entities: Vec<MessageEntity>,
}

impl Message {
    pub fn from_value(value: &Value) -> Result<Self> {
        decode::from_value(value)
    }

    /// Username of the sender, or `""` when there is no sender.
    pub fn sender(&self) -> &str {
        self.from.as_ref().map_or("", |u| u.username.as_str())
    }

    /// `date` rendered in the local timezone.
    ///
    /// `None` when the timestamp is outside the representable range.
    pub fn get_date(&self) -> Option<String> {
        self.get_date_in(&Local)
    }

    pub fn get_date_in<Tz>(&self, tz: &Tz) -> Option<String>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let Some(utc) = DateTime::<Utc>::from_timestamp(self.date, 0) else {
            tracing::warn!(date = self.date, "message date out of range");
            return None;
        };
        Some(utc.with_timezone(tz).format(CTIME_FORMAT).to_string())
    }

    pub fn entities_count(&self) -> usize {
        self.entities.len()
    }

    pub fn caption_entities_count(&self) -> usize {
        self.caption_entities.len()
    }

    /// The single entity type shared by every text and caption entity.
    pub fn entity_type(&self) -> std::result::Result<&str, EntityTypeError> {
        let mut all = self.entities.iter().chain(&self.caption_entities);
        let first = all.next().ok_or(EntityTypeError::NotFound)?;
        match all.find(|e| e.kind != first.kind) {
            Some(other) => Err(EntityTypeError::Mixed {
                expected: first.kind.clone(),
                found: other.kind.clone(),
            }),
            None => Ok(first.kind.as_str()),
        }
    }

    /// `text` when non-empty, otherwise `caption`.
    pub fn content(&self) -> &str {
        if self.text.is_empty() {
            &self.caption
        } else {
            &self.text
        }
    }

    /// Number of characters in [`Message::content`].
    pub fn len(&self) -> usize {
        self.content().chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content().is_empty()
    }

    pub fn entity_text(&self, entity: &MessageEntity) -> Option<String> {
        entity.extract(&self.text)
    }

    pub fn caption_entity_text(&self, entity: &MessageEntity) -> Option<String> {
        entity.extract(&self.caption)
    }

    /// Text of the first `bot_command` entity, e.g. `/start@my_bot`.
    pub fn bot_command(&self) -> Option<String> {
        self.entities
            .iter()
            .find(|e| e.kind == "bot_command")
            .and_then(|e| self.entity_text(e))
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.content())
    }
}
