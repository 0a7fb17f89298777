use serde::Deserialize;
use serde_json::Value;

use crate::{decode, Result};

/// Attachment metadata, or a resolved file handle when `file_path` is set.
///
/// Telegram's `Document` and `File` objects share this shape. `file_path` is
/// only ever present on the latter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "decode::null_default")]
    pub file_id: String,
    #[serde(default, deserialize_with = "decode::null_default")]
    pub file_unique_id: String,
    #[serde(default, deserialize_with = "decode::null_default")]
    pub file_name: String,
    #[serde(default, deserialize_with = "decode::null_default")]
    pub mime_type: String,
    #[serde(default, deserialize_with = "decode::null_default")]
    pub file_size: u64,
    #[serde(default)]
    pub file_path: Option<String>,
}

impl Document {
    pub fn from_value(value: &Value) -> Result<Self> {
        decode::from_value(value)
    }

    pub fn is_resolved(&self) -> bool {
        self.file_path.is_some()
    }
}
