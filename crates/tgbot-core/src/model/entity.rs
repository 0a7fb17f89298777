use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::{decode, Result};

/// A typed span inside a message's text or caption.
///
/// `offset` and `length` count UTF-16 code units, as the Bot API does.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MessageEntity {
    #[serde(rename = "type", default, deserialize_with = "decode::null_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "decode::null_default")]
    pub offset: usize,
    #[serde(default, deserialize_with = "decode::null_default")]
    pub length: usize,
    /// Only set for `pre` entities.
    #[serde(default, deserialize_with = "decode::null_default")]
    pub language: String,
}

impl MessageEntity {
    pub fn from_value(value: &Value) -> Result<Self> {
        decode::from_value(value)
    }

    /// Cut this entity's span out of `text`.
    ///
    /// Returns `None` when the span falls outside the text or splits a
    /// surrogate pair.
    pub fn extract(&self, text: &str) -> Option<String> {
        let units: Vec<u16> = text.encode_utf16().collect();
        let end = self.offset.checked_add(self.length)?;
        let span = units.get(self.offset..end)?;
        String::from_utf16(span).ok()
    }
}

impl fmt::Display for MessageEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Entity {}>", self.kind)
    }
}
