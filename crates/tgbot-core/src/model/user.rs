use serde::Deserialize;
use serde_json::Value;

use crate::{decode, Result};

/// A Telegram user or bot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct User {
    /// `None` when the payload carried no id, which is distinct from a real id.
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "decode::null_default")]
    pub is_bot: bool,
    #[serde(default, deserialize_with = "decode::null_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "decode::null_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "decode::null_default")]
    pub username: String,
    #[serde(default, deserialize_with = "decode::null_default")]
    pub language_code: String,
}

impl User {
    pub fn from_value(value: &Value) -> Result<Self> {
        decode::from_value(value)
    }
}
