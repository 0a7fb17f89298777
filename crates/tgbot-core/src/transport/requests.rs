use serde_json::{json, Map, Value};

use crate::domain::ChatId;

/// `getUpdates` long-poll parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GetUpdates {
    pub offset: i64,
    pub limit: u32,
    /// Seconds the server may hold the request open.
    pub timeout: u32,
}

impl GetUpdates {
    pub const METHOD: &'static str = "getUpdates";

    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("offset", self.offset.to_string()),
            ("limit", self.limit.to_string()),
            ("timeout", self.timeout.to_string()),
        ]
    }
}

/// `sendMessage` body.
#[derive(Clone, Debug, PartialEq)]
pub struct SendMessage {
    pub chat_id: ChatId,
    pub text: String,
    /// Omitted from the body when empty.
    pub parse_mode: String,
    /// Extra API options; these win over the fields above on a key clash.
    pub extra: Map<String, Value>,
}

impl SendMessage {
    pub const METHOD: &'static str = "sendMessage";

    pub fn new(chat_id: impl Into<ChatId>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: text.into(),
            parse_mode: String::new(),
            extra: Map::new(),
        }
    }

    pub fn parse_mode(mut self, mode: impl Into<String>) -> Self {
        self.parse_mode = mode.into();
        self
    }

    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn body(&self) -> Value {
        let mut body = Map::new();
        body.insert("chat_id".to_string(), json!(self.chat_id.as_str()));
        body.insert("text".to_string(), json!(self.text));
        if !self.parse_mode.is_empty() {
            body.insert("parse_mode".to_string(), json!(self.parse_mode));
        }
        for (k, v) in &self.extra {
            body.insert(k.clone(), v.clone());
        }
        Value::Object(body)
    }
}

/// `deleteWebhook` body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeleteWebhook {
    pub drop_pending_updates: bool,
}

impl DeleteWebhook {
    pub const METHOD: &'static str = "deleteWebhook";

    pub fn body(&self) -> Value {
        json!({ "drop_pending_updates": self.drop_pending_updates })
    }
}
