use serde_json::{Map, Value};

use crate::{
    config::Config,
    domain::ChatId,
    errors::Error,
    model::UpdateBatch,
    transport::{DeleteWebhook, GetUpdates, SendMessage, Transport},
    Result,
};

/// Bot API facade over a [`Transport`].
///
/// Every call performs exactly one HTTP exchange. Polling loops, offsets and
/// concurrency belong to the caller.
#[derive(Clone, Debug)]
pub struct Bot<T> {
    transport: T,
    poll_limit: u32,
    poll_timeout: u32,
}

impl<T: Transport> Bot<T> {
    /// A bot polling with the API defaults of [`Config::new`].
    pub fn new(transport: T) -> Self {
        Self::configured(transport, &Config::new(""))
    }

    /// A bot taking its poll limit and timeout from `cfg`.
    pub fn configured(transport: T, cfg: &Config) -> Self {
        Self {
            transport,
            poll_limit: cfg.poll_limit,
            poll_timeout: cfg.poll_timeout_secs(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Long-poll for updates and return the raw response envelope.
    pub async fn get_updates(&self, offset: i64, limit: u32, timeout: u32) -> Result<Value> {
        let req = GetUpdates {
            offset,
            limit,
            timeout,
        };
        tracing::debug!(offset, limit, timeout, "polling for updates");
        self.transport.get(GetUpdates::METHOD, &req.query()).await
    }

    /// [`Bot::get_updates`], decoded into an [`UpdateBatch`].
    pub async fn fetch_updates(&self, offset: i64, limit: u32, timeout: u32) -> Result<UpdateBatch> {
        let envelope = self.get_updates(offset, limit, timeout).await?;
        let batch = UpdateBatch::from_envelope(&envelope)?;
        tracing::debug!(count = batch.len(), "decoded updates");
        Ok(batch)
    }

    /// One long poll from `offset` with the configured limit and timeout.
    pub async fn poll(&self, offset: i64) -> Result<UpdateBatch> {
        self.fetch_updates(offset, self.poll_limit, self.poll_timeout)
            .await
    }

    /// Send a text message.
    ///
    /// `parse_mode` is sent only when non-empty. Keys in `extra` override the
    /// built-in body fields.
    pub async fn send_message(
        &self,
        chat_id: impl Into<ChatId>,
        text: &str,
        parse_mode: &str,
        extra: Map<String, Value>,
    ) -> Result<Value> {
        let mut req = SendMessage::new(chat_id, text).parse_mode(parse_mode);
        req.extra = extra;
        self.send(&req).await
    }

    pub async fn send(&self, req: &SendMessage) -> Result<Value> {
        tracing::debug!(chat_id = %req.chat_id, "sending message");
        self.transport.post(SendMessage::METHOD, &req.body()).await
    }

    pub async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<Value> {
        let req = DeleteWebhook {
            drop_pending_updates,
        };
        self.transport.post(DeleteWebhook::METHOD, &req.body()).await
    }

    /// Webhook subscription is not supported; fails without any request.
    pub async fn set_webhook(&self, _url: &str, _extra: Map<String, Value>) -> Result<Value> {
        Err(Error::Unimplemented("setWebhook"))
    }

    /// File resolution is not supported; fails without any request.
    pub async fn get_file(&self, _file_id: &str) -> Result<Value> {
        Err(Error::Unimplemented("getFile"))
    }

    /// Document upload is not supported; fails without any request.
    pub async fn send_document(&self, _chat_id: impl Into<ChatId>) -> Result<Value> {
        Err(Error::Unimplemented("sendDocument"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::ParseMode;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        Get(String, Vec<(&'static str, String)>),
        Post(String, Value),
    }

    #[derive(Default)]
    struct FakeTransport {
        calls: Mutex<Vec<Call>>,
        reply: Value,
    }

    impl FakeTransport {
        fn replying(reply: Value) -> Self {
            Self {
                reply,
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn get(&self, method: &str, query: &[(&'static str, String)]) -> Result<Value> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Get(method.to_string(), query.to_vec()));
            Ok(self.reply.clone())
        }

        async fn post(&self, method: &str, body: &Value) -> Result<Value> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Post(method.to_string(), body.clone()));
            Ok(self.reply.clone())
        }
    }

    #[tokio::test]
    async fn get_updates_passes_poll_params() {
        let bot = Bot::new(FakeTransport::replying(json!({"ok": true, "result": []})));
        let raw = bot.get_updates(10, 100, 30).await.unwrap();
        assert_eq!(raw["ok"], true);
        assert_eq!(
            bot.transport().calls(),
            vec![Call::Get(
                "getUpdates".to_string(),
                vec![
                    ("offset", "10".to_string()),
                    ("limit", "100".to_string()),
                    ("timeout", "30".to_string()),
                ]
            )]
        );
    }

    #[tokio::test]
    async fn fetch_updates_decodes_envelope() {
        let bot = Bot::new(FakeTransport::replying(json!({
            "ok": true,
            "result": [
                {"update_id": 3, "message": {"message_id": 1, "text": "a"}},
                {"update_id": 4, "channel_post": {"message_id": 2, "text": "b"}}
            ]
        })));
        let batch = bot.fetch_updates(0, 100, 0).await.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[1].u_type(), Some("channel_post"));
        assert_eq!(batch.next_offset(), Some(5));
    }

    #[tokio::test]
    async fn poll_uses_configured_limit_and_timeout() {
        let mut cfg = Config::new("t");
        cfg.poll_limit = 20;
        cfg.poll_timeout = std::time::Duration::from_secs(5);
        let bot = Bot::configured(
            FakeTransport::replying(json!({"ok": true, "result": []})),
            &cfg,
        );
        let batch = bot.poll(77).await.unwrap();
        assert!(batch.is_empty());
        assert_eq!(
            bot.transport().calls(),
            vec![Call::Get(
                "getUpdates".to_string(),
                vec![
                    ("offset", "77".to_string()),
                    ("limit", "20".to_string()),
                    ("timeout", "5".to_string()),
                ]
            )]
        );
    }

    #[tokio::test]
    async fn fetch_updates_surfaces_api_failure() {
        let bot = Bot::new(FakeTransport::replying(json!({
            "ok": false, "error_code": 409, "description": "Conflict: terminated by other getUpdates request"
        })));
        assert!(matches!(
            bot.fetch_updates(0, 100, 0).await,
            Err(Error::Api { code: 409, .. })
        ));
    }

    #[tokio::test]
    async fn send_message_posts_merged_body() {
        let bot = Bot::new(FakeTransport::replying(json!({"ok": true, "result": {}})));
        let mut extra = Map::new();
        extra.insert("disable_web_page_preview".to_string(), json!(true));
        bot.send_message("584874747", "<b>hi</b>", ParseMode::Html.as_str(), extra)
            .await
            .unwrap();

        assert_eq!(
            bot.transport().calls(),
            vec![Call::Post(
                "sendMessage".to_string(),
                json!({
                    "chat_id": "584874747",
                    "text": "<b>hi</b>",
                    "parse_mode": "HTML",
                    "disable_web_page_preview": true
                })
            )]
        );
    }

    #[tokio::test]
    async fn reply_targets_the_decoded_chat() {
        let bot = Bot::new(FakeTransport::replying(json!({"ok": true})));
        let chat = crate::model::Chat::from_value(&json!({"id": -551169338, "type": "group"})).unwrap();
        bot.send(&SendMessage::new(&chat, "pong")).await.unwrap();
        match &bot.transport().calls()[0] {
            Call::Post(_, body) => assert_eq!(body["chat_id"], "-551169338"),
            other => panic!("unexpected call: {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_webhook_posts_flag() {
        let bot = Bot::new(FakeTransport::replying(json!({"ok": true, "result": true})));
        let r = bot.delete_webhook(true).await.unwrap();
        assert_eq!(r["result"], true);
        assert_eq!(
            bot.transport().calls(),
            vec![Call::Post(
                "deleteWebhook".to_string(),
                json!({"drop_pending_updates": true})
            )]
        );
    }

    #[tokio::test]
    async fn unsupported_methods_fail_without_a_request() {
        let bot = Bot::new(FakeTransport::default());
        assert!(matches!(
            bot.set_webhook("https://example.org/hook", Map::new()).await,
            Err(Error::Unimplemented("setWebhook"))
        ));
        assert!(matches!(
            bot.get_file("BQAC").await,
            Err(Error::Unimplemented("getFile"))
        ));
        assert!(matches!(
            bot.send_document(1_i64).await,
            Err(Error::Unimplemented("sendDocument"))
        ));
        assert!(bot.transport().calls().is_empty());
    }
}
