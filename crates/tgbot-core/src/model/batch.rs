use std::{fmt, ops::Index};

use serde_json::Value;

use crate::{errors::Error, model::Update, Result};

/// The ordered `result` array of one `getUpdates` call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateBatch {
    updates: Vec<Update>,
}

impl UpdateBatch {
    /// Decode a full `{"ok": ..., "result": [...]}` envelope.
    pub fn from_envelope(envelope: &Value) -> Result<Self> {
        let obj = envelope
            .as_object()
            .ok_or_else(|| Error::Decode("response envelope must be a JSON object".to_string()))?;

        if let Some(err) = Error::from_failed_envelope(envelope) {
            return Err(err);
        }

        let result = obj
            .get("result")
            .ok_or_else(|| Error::Decode("response envelope has no result".to_string()))?;
        Self::from_results(result)
    }

    /// Decode a bare `result` array.
    pub fn from_results(results: &Value) -> Result<Self> {
        let items = results
            .as_array()
            .ok_or_else(|| Error::Decode(format!("result must be an array, got {results}")))?;
        let updates = items.iter().map(Update::from_value).collect::<Result<Vec<_>>>()?;
        Ok(Self { updates })
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Update> {
        self.updates.get(index)
    }

    pub fn try_get(&self, index: usize) -> Result<&Update> {
        self.updates.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.updates.len(),
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Update> {
        self.updates.iter()
    }

    /// Offset for the next poll: highest `update_id` seen plus one.
    pub fn next_offset(&self) -> Option<i64> {
        self.updates.iter().map(|u| u.update_id).max().map(|id| id + 1)
    }
}

impl Index<usize> for UpdateBatch {
    type Output = Update;

    fn index(&self, index: usize) -> &Update {
        &self.updates[index]
    }
}

impl IntoIterator for UpdateBatch {
    type Item = Update;
    type IntoIter = std::vec::IntoIter<Update>;

    fn into_iter(self) -> Self::IntoIter {
        self.updates.into_iter()
    }
}

impl<'a> IntoIterator for &'a UpdateBatch {
    type Item = &'a Update;
    type IntoIter = std::slice::Iter<'a, Update>;

    fn into_iter(self) -> Self::IntoIter {
        self.updates.iter()
    }
}

impl fmt::Display for UpdateBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<UpdateBatch [{}]>", self.updates.len())
    }
}
