//! End-to-end handler tests with a scripted backend and mock web server.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{scripted_relay, test_config, RecordingSink};
use pretty_assertions::assert_eq;
use relaybot::config::RelayConfig;
use relaybot::error::RelayError;
use relaybot::fetch::PageFetcher;
use relaybot::provider::http::build_client;
use relaybot::provider::InferenceClient;
use relaybot::relay::{
    Relay, ANALYSIS_FAILURE_REPLY, ANALYZE_PROMPT, CHAT_FAILURE_REPLY, CLEARED_REPLY,
    MISSING_ARGUMENT_REPLY, PONG_REPLY, UNKNOWN_COMMAND_REPLY,
};
use relaybot::types::{ChatTurn, Role};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn contents(turns: &[ChatTurn]) -> Vec<&str> {
    turns.iter().map(ChatTurn::content).collect()
}

#[tokio::test]
async fn chat_prepends_system_turn_to_history() {
    let config = RelayConfig {
        system_prompt: "You are terse.".into(),
        ..test_config()
    };
    let (relay, backend) = scripted_relay(config);
    backend.queue_reply("first reply");
    backend.queue_reply("second reply");
    let sink = RecordingSink::new();

    relay.handle_incoming("42", "hello", &sink).await.unwrap();
    relay.handle_incoming("42", "again", &sink).await.unwrap();

    assert_eq!(sink.sent(), vec!["first reply", "second reply"]);
    let last = backend.last_request().unwrap();
    assert_eq!(last[0], ChatTurn::system("You are terse."));
    assert_eq!(contents(&last), vec!["You are terse.", "hello", "again"]);
}

#[tokio::test]
async fn only_user_turns_are_remembered_by_default() {
    let (relay, backend) = scripted_relay(test_config());
    backend.queue_reply("answer");
    let sink = RecordingSink::new();

    relay.handle_incoming("u", "question", &sink).await.unwrap();

    let history = relay.history().snapshot("u");
    assert_eq!(history, vec![ChatTurn::user("question")]);
}

#[tokio::test]
async fn replies_are_remembered_when_enabled() {
    let config = RelayConfig {
        remember_replies: true,
        ..test_config()
    };
    let (relay, backend) = scripted_relay(config);
    backend.queue_reply("answer");
    let sink = RecordingSink::new();

    relay.handle_incoming("u", "question", &sink).await.unwrap();

    let roles: Vec<Role> = relay.history().snapshot("u").iter().map(ChatTurn::role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant]);
}

#[tokio::test]
async fn request_window_is_bounded_by_capacity() {
    let config = RelayConfig {
        history_capacity: 3,
        ..test_config()
    };
    let (relay, backend) = scripted_relay(config);
    let sink = RecordingSink::new();

    for i in 0..5 {
        relay
            .handle_incoming("u", &format!("m{i}"), &sink)
            .await
            .unwrap();
    }

    let last = backend.last_request().unwrap();
    assert_eq!(contents(&last), vec!["", "m2", "m3", "m4"]);
}

#[tokio::test]
async fn endpoint_500_yields_fallback_and_keeps_user_turn() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let config = RelayConfig {
        inference_url: format!("{}/v1/chat/completions", server.uri()),
        ..test_config()
    };
    let relay = Relay::from_config(config).unwrap();
    let sink = RecordingSink::new();

    relay.handle_incoming("7", "are you there?", &sink).await.unwrap();

    assert_eq!(sink.sent(), vec![CHAT_FAILURE_REPLY]);
    assert_eq!(relay.history().snapshot("7"), vec![ChatTurn::user("are you there?")]);
}

#[tokio::test]
async fn failure_for_one_user_does_not_touch_another() {
    let (relay, backend) = scripted_relay(test_config());
    backend.queue_error(RelayError::status(500, ""));
    backend.queue_reply("fine");
    let alice = RecordingSink::new();
    let bob = RecordingSink::new();

    relay.handle_incoming("alice", "one", &alice).await.unwrap();
    relay.handle_incoming("bob", "two", &bob).await.unwrap();

    assert_eq!(alice.sent(), vec![CHAT_FAILURE_REPLY]);
    assert_eq!(bob.sent(), vec!["fine"]);
    assert_eq!(contents(&relay.history().snapshot("bob")), vec!["two"]);
}

#[tokio::test]
async fn long_reply_is_split_at_message_limit() {
    let (relay, backend) = scripted_relay(test_config());
    let reply = "r".repeat(4500);
    backend.queue_reply(&reply);
    let sink = RecordingSink::new();

    relay.handle_incoming("u", "tell me a story", &sink).await.unwrap();

    let lens: Vec<usize> = sink.sent().iter().map(|m| m.chars().count()).collect();
    assert_eq!(lens, vec![2000, 2000, 500]);
    assert_eq!(sink.sent().concat(), reply);
}

#[tokio::test(start_paused = true)]
async fn chunks_are_spaced_by_the_configured_delay() {
    let config = RelayConfig {
        chunk_delay_ms: 1000,
        ..test_config()
    };
    let (relay, backend) = scripted_relay(config);
    backend.queue_reply(&"r".repeat(4500));
    let sink = RecordingSink::new();

    let start = tokio::time::Instant::now();
    relay.handle_incoming("u", "go", &sink).await.unwrap();

    assert_eq!(sink.sent().len(), 3);
    let elapsed = start.elapsed();
    assert!(
        elapsed >= Duration::from_secs(2) && elapsed < Duration::from_secs(3),
        "elapsed {elapsed:?}"
    );
}

#[tokio::test]
async fn empty_reply_sends_nothing() {
    let (relay, backend) = scripted_relay(test_config());
    backend.queue_reply("");
    let sink = RecordingSink::new();

    relay.handle_incoming("u", "hm", &sink).await.unwrap();

    assert!(sink.sent().is_empty());
}

#[tokio::test]
async fn failing_sink_stops_remaining_chunks() {
    let (relay, backend) = scripted_relay(test_config());
    backend.queue_reply(&"r".repeat(4500));
    let sink = RecordingSink::failing_after(1);

    let err = relay.handle_incoming("u", "go", &sink).await.unwrap_err();

    assert!(matches!(err, RelayError::Platform(_)));
    assert_eq!(sink.sent().len(), 1);
}

#[tokio::test]
async fn ping_and_unknown_commands() {
    let (relay, backend) = scripted_relay(test_config());
    let sink = RecordingSink::new();

    relay.handle_incoming("u", "!ping", &sink).await.unwrap();
    relay.handle_incoming("u", "!dance", &sink).await.unwrap();
    relay.handle_incoming("u", "!web_scrape", &sink).await.unwrap();

    assert_eq!(
        sink.sent(),
        vec![PONG_REPLY, UNKNOWN_COMMAND_REPLY, MISSING_ARGUMENT_REPLY]
    );
    assert!(backend.requests().is_empty());
    assert!(relay.history().snapshot("u").is_empty());
}

#[tokio::test]
async fn clear_command_empties_only_the_callers_history() {
    let (relay, _backend) = scripted_relay(test_config());
    let sink = RecordingSink::new();
    relay.handle_incoming("a", "hi", &sink).await.unwrap();
    relay.handle_incoming("b", "hey", &sink).await.unwrap();

    relay.handle_incoming("a", "!clear", &sink).await.unwrap();

    assert_eq!(sink.sent().last().map(String::as_str), Some(CLEARED_REPLY));
    assert!(relay.history().snapshot("a").is_empty());
    assert_eq!(relay.history().len("b"), 1);
}

#[tokio::test]
async fn web_scrape_sends_numbered_parts() {
    let server = MockServer::start().await;
    let body = format!("<html><body><p>{}</p></body></html>", "w".repeat(3000));
    Mock::given(method("GET"))
        .and(path("/long"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let (relay, _backend) = scripted_relay(test_config());
    let sink = RecordingSink::new();

    relay
        .handle_incoming("u", &format!("!web_scrape {}/long", server.uri()), &sink)
        .await
        .unwrap();

    let sent = sink.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], format!("**Page Content (Part 1/2)**\n{}", "w".repeat(1950)));
    assert_eq!(sent[1], format!("**Page Content (Part 2/2)**\n{}", "w".repeat(1050)));
}

#[tokio::test]
async fn web_scrape_reports_status_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let (relay, _backend) = scripted_relay(test_config());
    let sink = RecordingSink::new();

    relay
        .handle_incoming("u", &format!("!web_scrape {}/secret", server.uri()), &sink)
        .await
        .unwrap();

    assert_eq!(sink.sent(), vec!["Failed to retrieve the page. Status code: 403"]);
}

#[tokio::test]
async fn analyze_sends_sentiment_then_summary() {
    let server = MockServer::start().await;
    let page = format!(
        "<html><body><p>What a wonderful, excellent product. I love it.</p><p>{}</p></body></html>",
        "z".repeat(5000)
    );
    Mock::given(method("GET"))
        .and(path("/review"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&server)
        .await;

    let (relay, backend) = scripted_relay(test_config());
    backend.queue_reply("A glowing review.");
    let sink = RecordingSink::new();

    relay
        .handle_incoming("u", &format!("!analyze {}/review", server.uri()), &sink)
        .await
        .unwrap();

    let sent = sink.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].starts_with("The sentiment of the page is `0."), "{}", sent[0]);
    assert_eq!(sent[1], "**AI Analysis (Part 1/1)**\nA glowing review.");

    let request = backend.last_request().unwrap();
    assert_eq!(request.len(), 2);
    assert_eq!(request[0], ChatTurn::system(ANALYZE_PROMPT));
    assert_eq!(request[1].role(), Role::User);
    assert_eq!(request[1].content().chars().count(), 4000);
    assert!(relay.history().snapshot("u").is_empty());
}

#[tokio::test]
async fn analyze_falls_back_when_summary_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>neutral words here</p>"))
        .mount(&server)
        .await;

    let (relay, backend) = scripted_relay(test_config());
    backend.queue_error(RelayError::MalformedResponse("no choices".into()));
    let sink = RecordingSink::new();

    relay
        .handle_incoming("u", &format!("!analyze {}/", server.uri()), &sink)
        .await
        .unwrap();

    assert_eq!(
        sink.sent(),
        vec![
            "The sentiment of the page is `0`.".to_string(),
            format!("**AI Analysis (Part 1/1)**\n{ANALYSIS_FAILURE_REPLY}"),
        ]
    );
}

#[tokio::test]
async fn analyze_page_failure_skips_summary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let (relay, backend) = scripted_relay(test_config());
    let sink = RecordingSink::new();

    relay
        .handle_incoming("u", &format!("!analyze {}/", server.uri()), &sink)
        .await
        .unwrap();

    assert_eq!(sink.sent(), vec!["Failed to retrieve the page. Status code: 502"]);
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn concurrent_messages_share_one_relay() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "ack"}}]
        })))
        .mount(&server)
        .await;

    let config = test_config();
    let client = build_client(Duration::from_secs(5)).unwrap();
    let backend = Arc::new(InferenceClient::new(
        client.clone(),
        format!("{}/v1/chat/completions", server.uri()),
        None,
    ));
    let relay = Arc::new(Relay::new(config, backend, PageFetcher::new(client)));

    let tasks: Vec<_> = (0..10)
        .map(|u| {
            let relay = relay.clone();
            tokio::spawn(async move {
                let sink = RecordingSink::new();
                let user = format!("user-{u}");
                for i in 0..3 {
                    relay
                        .handle_incoming(&user, &format!("{user} says {i}"), &sink)
                        .await
                        .unwrap();
                }
                sink.sent()
            })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap(), vec!["ack", "ack", "ack"]);
    }
    for u in 0..10 {
        let user = format!("user-{u}");
        let history = relay.history().snapshot(&user);
        assert_eq!(history.len(), 3);
        assert!(history.iter().all(|t| t.content().starts_with(&user)));
    }
}
