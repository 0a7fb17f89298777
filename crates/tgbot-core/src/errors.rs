/// Core error type.
///
/// Transport adapters map their specific failures into `Api` or `External`
/// so callers only ever match on this one enum.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("update {update_id} carries more than one event kind: {keys:?}")]
    AmbiguousUpdate { update_id: i64, keys: Vec<String> },

    #[error(transparent)]
    EntityType(#[from] EntityTypeError),

    #[error("index {index} out of range for batch of {len} updates")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{0} is not supported yet")]
    Unimplemented(&'static str),

    #[error("telegram api error {code}: {description}")]
    Api { code: i64, description: String },

    #[error("external error: {0}")]
    External(String),
}

impl Error {
    /// `Some(Error::Api)` when the envelope reports `"ok": false`.
    pub fn from_failed_envelope(envelope: &serde_json::Value) -> Option<Self> {
        if envelope.get("ok").and_then(serde_json::Value::as_bool) != Some(false) {
            return None;
        }
        Some(Error::Api {
            code: envelope
                .get("error_code")
                .and_then(serde_json::Value::as_i64)
                .unwrap_or_default(),
            description: envelope
                .get("description")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("no description")
                .to_string(),
        })
    }
}

/// Why a message's entities could not be classified under one type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EntityTypeError {
    #[error("no entities")]
    NotFound,

    #[error("multiple entities with different types: {expected} and {found}")]
    Mixed { expected: String, found: String },
}

pub type Result<T> = std::result::Result<T, Error>;
