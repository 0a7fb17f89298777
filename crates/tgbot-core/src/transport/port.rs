use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

/// Raw Bot API transport.
///
/// Implementations address `method` against their configured bot endpoint and
/// return the decoded JSON body. Network failures, non-2xx statuses and
/// malformed bodies surface as errors; nothing is retried.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, method: &str, query: &[(&'static str, String)]) -> Result<Value>;

    async fn post(&self, method: &str, body: &Value) -> Result<Value>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn get(&self, method: &str, query: &[(&'static str, String)]) -> Result<Value> {
        (**self).get(method, query).await
    }

    async fn post(&self, method: &str, body: &Value) -> Result<Value> {
        (**self).post(method, body).await
    }
}
