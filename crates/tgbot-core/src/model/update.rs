use std::fmt;

use serde_json::Value;

use crate::{errors::Error, model::Message, Result};

/// Event kind of an update, named after its top-level key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum UpdateKind {
    Message,
    EditedMessage,
    ChannelPost,
    EditedChannelPost,
    /// A key this crate does not model (`callback_query`, `poll`, ...).
    Unknown(String),
    /// More than one event key besides `update_id`; holds every key found.
    Ambiguous(Vec<String>),
}

impl UpdateKind {
    pub fn from_key(key: &str) -> Self {
        match key {
            "message" => UpdateKind::Message,
            "edited_message" => UpdateKind::EditedMessage,
            "channel_post" => UpdateKind::ChannelPost,
            "edited_channel_post" => UpdateKind::EditedChannelPost,
            other => UpdateKind::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            UpdateKind::Message => "message",
            UpdateKind::EditedMessage => "edited_message",
            UpdateKind::ChannelPost => "channel_post",
            UpdateKind::EditedChannelPost => "edited_channel_post",
            UpdateKind::Unknown(key) => key,
            UpdateKind::Ambiguous(_) => "ambiguous",
        }
    }

    /// Whether the payload under this key is message-shaped.
    pub fn carries_message(&self) -> bool {
        !matches!(self, UpdateKind::Unknown(_) | UpdateKind::Ambiguous(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Payload {
    None,
    Message(Message),
    Raw(Value),
}

/// One event delivered by `getUpdates`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Update {
    pub update_id: i64,
    kind: Option<UpdateKind>,
    payload: Payload,
}

impl Update {
    /// Decode one element of the `result` array.
    ///
    /// Besides `update_id` the object should hold at most one key. More than
    /// one yields [`UpdateKind::Ambiguous`] with the conflicting keys kept raw,
    /// so the rest of a batch still decodes and the offset can move past it.
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| Error::Decode(format!("update must be a JSON object, got {value}")))?;

        let update_id = obj
            .get("update_id")
            .and_then(Value::as_i64)
            .ok_or_else(|| Error::Decode("update is missing an integer update_id".to_string()))?;

        let mut rest = obj.iter().filter(|(k, _)| k.as_str() != "update_id");
        let Some((key, inner)) = rest.next() else {
            return Ok(Self {
                update_id,
                kind: None,
                payload: Payload::None,
            });
        };

        let extra: Vec<String> = rest.map(|(k, _)| k.clone()).collect();
        if !extra.is_empty() {
            let mut keys = vec![key.clone()];
            keys.extend(extra);
            tracing::warn!(update_id, ?keys, "update carries more than one event kind");
            let raw = obj
                .iter()
                .filter(|(k, _)| k.as_str() != "update_id")
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            return Ok(Self {
                update_id,
                kind: Some(UpdateKind::Ambiguous(keys)),
                payload: Payload::Raw(Value::Object(raw)),
            });
        }

        let kind = UpdateKind::from_key(key);
        let payload = if inner.is_null() {
            Payload::None
        } else if kind.carries_message() {
            Payload::Message(Message::from_value(inner)?)
        } else {
            tracing::debug!(
                update_id,
                kind = kind.as_str(),
                "keeping raw payload of unmodelled update kind"
            );
            Payload::Raw(inner.clone())
        };

        Ok(Self {
            update_id,
            kind: Some(kind),
            payload,
        })
    }

    pub fn kind(&self) -> Option<&UpdateKind> {
        self.kind.as_ref()
    }

    /// The top-level key the event was found under; `None` when there was no
    /// single such key.
    pub fn u_type(&self) -> Option<&str> {
        match &self.kind {
            Some(UpdateKind::Ambiguous(_)) | None => None,
            Some(kind) => Some(kind.as_str()),
        }
    }

    /// Fail with [`Error::AmbiguousUpdate`] when this update has several event
    /// kinds.
    pub fn ensure_unambiguous(&self) -> Result<&Self> {
        match &self.kind {
            Some(UpdateKind::Ambiguous(keys)) => Err(Error::AmbiguousUpdate {
                update_id: self.update_id,
                keys: keys.clone(),
            }),
            _ => Ok(self),
        }
    }

    /// The decoded message-shaped payload, if the kind carries one.
    pub fn object(&self) -> Option<&Message> {
        match &self.payload {
            Payload::Message(m) => Some(m),
            _ => None,
        }
    }

    /// Raw payload of an [`UpdateKind::Unknown`] update, or the object holding
    /// every conflicting key of an [`UpdateKind::Ambiguous`] one.
    pub fn raw_payload(&self) -> Option<&Value> {
        match &self.payload {
            Payload::Raw(v) => Some(v),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&Message> {
        self.object_of(UpdateKind::Message)
    }

    pub fn channel_post(&self) -> Option<&Message> {
        self.object_of(UpdateKind::ChannelPost)
    }

    fn object_of(&self, kind: UpdateKind) -> Option<&Message> {
        if self.kind.as_ref() == Some(&kind) {
            self.object()
        } else {
            None
        }
    }
}

impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Update {}>", self.update_id)
    }
}
