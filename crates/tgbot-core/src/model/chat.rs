use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::{decode, Result};

/// The kind of chat, parsed from the wire `type` string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChatType {
    Private,
    Group,
    Supergroup,
    Channel,
    Other,
}

impl ChatType {
    pub fn parse(s: &str) -> Self {
        match s {
            "private" => ChatType::Private,
            "group" => ChatType::Group,
            "supergroup" => ChatType::Supergroup,
            "channel" => ChatType::Channel,
            _ => ChatType::Other,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Chat {
    /// Decimal string form of the chat id, sign preserved.
    #[serde(default, deserialize_with = "decode::id_as_string")]
    pub id: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "decode::null_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "decode::null_default")]
    pub title: String,
    #[serde(default, deserialize_with = "decode::null_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "decode::null_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "decode::null_default")]
    pub username: String,
    /// Only meaningful for basic groups.
    #[serde(default, deserialize_with = "decode::null_default")]
    pub all_members_are_administrators: bool,
}

impl Chat {
    pub fn from_value(value: &Value) -> Result<Self> {
        decode::from_value(value)
    }

    pub fn chat_type(&self) -> ChatType {
        ChatType::parse(&self.kind)
    }
}

impl fmt::Display for Chat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = format!(
            "{} {} {} {}",
            self.title, self.username, self.first_name, self.last_name
        );
        f.write_str(s.trim())
    }
}
