//! `reqwest` implementation of the `tgbot-core` transport port.

use async_trait::async_trait;
use serde_json::Value;

use tgbot_core::{config::Config, errors::Error, transport::Transport, Result};

#[derive(Clone, Debug)]
pub struct HttpTransport {
    api_bot_address: String,
    file_address: String,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(cfg: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(cfg.request_timeout)
            .build()
            .map_err(|e| Error::External(format!("http client build error: {e}")))?;
        Ok(Self::with_client(cfg, http))
    }

    /// Use a preconfigured client, e.g. one with a proxy.
    pub fn with_client(cfg: &Config, http: reqwest::Client) -> Self {
        let base = cfg.api_address.trim_end_matches('/');
        let bot_prefixed = format!("bot{}", cfg.bot_token);
        Self {
            api_bot_address: format!("{base}/{bot_prefixed}"),
            file_address: format!("{base}/file/{bot_prefixed}"),
            http,
        }
    }

    pub fn api_url(&self, method: &str) -> String {
        format!("{}/{method}", self.api_bot_address)
    }

    /// Download URL for a resolved file's `file_path`.
    pub fn file_url(&self, file_path: &str) -> String {
        format!("{}/{}", self.file_address, file_path.trim_start_matches('/'))
    }

    async fn read_body(method: &str, resp: reqwest::Response) -> Result<Value> {
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| Error::External(format!("telegram {method} read error: {e}")))?;

        if !status.is_success() {
            // Telegram reports most failures as an `ok: false` envelope.
            let err = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| Error::from_failed_envelope(&v))
                .unwrap_or_else(|| {
                    Error::External(format!(
                        "telegram {method} failed: {status} {}",
                        text.chars().take(200).collect::<String>()
                    ))
                });
            tracing::warn!(method, %status, error = %err, "telegram request failed");
            return Err(err);
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, method: &str, query: &[(&'static str, String)]) -> Result<Value> {
        tracing::debug!(method, "GET");
        let resp = self
            .http
            .get(self.api_url(method))
            .query(query)
            .send()
            .await
            .map_err(|e| Error::External(format!("telegram {method} request error: {e}")))?;
        Self::read_body(method, resp).await
    }

    async fn post(&self, method: &str, body: &Value) -> Result<Value> {
        tracing::debug!(method, "POST");
        let resp = self
            .http
            .post(self.api_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| Error::External(format!("telegram {method} request error: {e}")))?;
        Self::read_body(method, resp).await
    }
}
