//! HttpTransport against a mock Bot API server.

use mockito::Matcher;
use serde_json::{json, Map};

use tgbot_core::{config::Config, formatting::ParseMode, Bot, Error};
use tgbot_http::HttpTransport;

const TEST_BOT_TOKEN: &str = "123456:test-token";

fn bot_for(server: &mockito::ServerGuard) -> Bot<HttpTransport> {
    let cfg = Config::new(TEST_BOT_TOKEN).with_api_address(server.url());
    Bot::configured(HttpTransport::new(&cfg).expect("transport"), &cfg)
}

#[tokio::test]
async fn get_updates_long_polls_with_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", format!("/bot{TEST_BOT_TOKEN}/getUpdates").as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("offset".into(), "112638473".into()),
            Matcher::UrlEncoded("limit".into(), "100".into()),
            Matcher::UrlEncoded("timeout".into(), "0".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "ok": true,
                "result": [{
                    "update_id": 112638473,
                    "message": {
                        "message_id": 42,
                        "date": 1631468558,
                        "chat": {"id": 584874747, "type": "private"},
                        "text": "/some_command",
                        "entities": [{"type": "bot_command", "offset": 0, "length": 13}]
                    }
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let bot = bot_for(&server);
    let batch = bot.fetch_updates(112638473, 100, 0).await.unwrap();
    mock.assert_async().await;

    assert_eq!(batch.len(), 1);
    let msg = batch[0].message().unwrap();
    assert_eq!(msg.entity_type(), Ok("bot_command"));
    assert_eq!(batch.next_offset(), Some(112638474));
}

#[tokio::test]
async fn poll_sends_configured_limit_and_timeout() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", format!("/bot{TEST_BOT_TOKEN}/getUpdates").as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("offset".into(), "12".into()),
            Matcher::UrlEncoded("limit".into(), "5".into()),
            Matcher::UrlEncoded("timeout".into(), "1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":true,"result":[]}"#)
        .create_async()
        .await;

    let mut cfg = Config::new(TEST_BOT_TOKEN).with_api_address(server.url());
    cfg.poll_limit = 5;
    cfg.poll_timeout = std::time::Duration::from_secs(1);
    let bot = Bot::configured(HttpTransport::new(&cfg).expect("transport"), &cfg);

    let batch = bot.poll(12).await.unwrap();
    mock.assert_async().await;
    assert!(batch.is_empty());
    assert_eq!(batch.next_offset(), None);
}

#[tokio::test]
async fn send_message_posts_json_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", format!("/bot{TEST_BOT_TOKEN}/sendMessage").as_str())
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "chat_id": "-551169338",
            "text": "hello",
            "parse_mode": "MarkdownV2",
            "disable_notification": true
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":true,"result":{"message_id":44,"date":1631468600,"text":"hello"}}"#)
        .create_async()
        .await;

    let bot = bot_for(&server);
    let mut extra = Map::new();
    extra.insert("disable_notification".to_string(), json!(true));
    let resp = bot
        .send_message("-551169338", "hello", ParseMode::MarkdownV2.as_str(), extra)
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(resp["result"]["message_id"], 44);
}

#[tokio::test]
async fn delete_webhook_posts_flag() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", format!("/bot{TEST_BOT_TOKEN}/deleteWebhook").as_str())
        .match_body(Matcher::Json(json!({"drop_pending_updates": false})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":true,"result":true,"description":"Webhook is already deleted"}"#)
        .create_async()
        .await;

    let bot = bot_for(&server);
    let resp = bot.delete_webhook(false).await.unwrap();
    mock.assert_async().await;
    assert_eq!(resp["ok"], true);
    assert_eq!(resp["result"], true);
}

#[tokio::test]
async fn error_status_maps_to_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", format!("/bot{TEST_BOT_TOKEN}/sendMessage").as_str())
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#)
        .create_async()
        .await;

    let bot = bot_for(&server);
    match bot.send_message("1", "x", "", Map::new()).await {
        Err(Error::Api { code, description }) => {
            assert_eq!(code, 400);
            assert_eq!(description, "Bad Request: chat not found");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_maps_to_external() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", Matcher::Regex(r"^/bot.*/getUpdates".to_string()))
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let bot = bot_for(&server);
    match bot.get_updates(0, 100, 0).await {
        Err(Error::External(msg)) => assert!(msg.contains("502")),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_json_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", Matcher::Regex(r"^/bot.*/getUpdates".to_string()))
        .with_status(200)
        .with_body("{not json")
        .create_async()
        .await;

    let bot = bot_for(&server);
    assert!(matches!(bot.get_updates(0, 1, 0).await, Err(Error::Json(_))));
}
