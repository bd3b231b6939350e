//! Chat completion client and remote prompt templates against a mock HTTP server

mod common;

use common::{captured_regions, closed_port_url, items, PromptFixture, StubSearch};
use serde_json::json;
use sift::config::SynthesisSettings;
use sift::pipeline::{Outcome, Pipeline};
use sift::query::QueryBuilder;
use sift::render::RegionContent;
use sift::synth::AnswerSynthesizer;
use std::sync::Arc;
use sift::llm::openai::OpenAiClient;
use sift::llm::types::ChatMessage;
use sift::llm::{ChatError, ChatProvider};
use sift::prompt::{PromptLoadError, PromptSource};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OpenAiClient {
    client_at(&format!("{}/", server.uri()))
}

fn client_at(api_base: &str) -> OpenAiClient {
    OpenAiClient::new(&SynthesisSettings {
        enabled: true,
        api_key: "sk-test".to_string(),
        api_base: api_base.to_string(),
        model: "gpt-4o-mini".to_string(),
        prompt: "unused".to_string(),
    })
}

fn messages() -> Vec<ChatMessage> {
    vec![ChatMessage::system("sys"), ChatMessage::user("hello")]
}

#[tokio::test]
async fn test_posts_model_and_messages_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_json(json!({
            "model": "gpt-4o-mini",
            "messages": [
                { "role": "system", "content": "sys" },
                { "role": "user", "content": "hello" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "first" } },
                { "index": 1, "message": { "role": "assistant", "content": "second" } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let content = client_for(&server).complete(messages()).await.unwrap();
    assert_eq!(content.as_deref(), Some("first"));
}

#[tokio::test]
async fn test_empty_choices_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    assert_eq!(client_for(&server).complete(messages()).await.unwrap(), None);
}

#[tokio::test]
async fn test_absent_choices_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "object": "chat.completion" })))
        .mount(&server)
        .await;

    assert_eq!(client_for(&server).complete(messages()).await.unwrap(), None);
}

#[tokio::test]
async fn test_http_failure_carries_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided: sk-test" }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).complete(messages()).await.unwrap_err();
    match err {
        ChatError::Api(message) => assert_eq!(message, "OpenAI API error: Unauthorized"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_success_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).complete(messages()).await.unwrap_err();
    assert!(matches!(err, ChatError::InvalidResponse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_non_json_success_body_renders_answer_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let prompt = PromptFixture::standard();
    let synthesizer = Arc::new(AnswerSynthesizer::new(Arc::new(client_for(&server)), prompt.source()));
    let search = Arc::new(StubSearch::with_items(items(2)));
    let pipeline = Arc::new(Pipeline::new(QueryBuilder::new("amazon.com"), search, Some(synthesizer)));
    let out = captured_regions();

    let outcome = pipeline.submit("rust").run(&out.regions).await;

    assert!(matches!(outcome, Outcome::AnswerFailed { .. }));
    assert_eq!(out.answer.current(), Some(RegionContent::answer_failed()));
    assert!(matches!(out.results.current(), Some(RegionContent::Results(v)) if v.len() == 2));
}

#[tokio::test]
async fn test_refused_connection_is_network_error() {
    let err = client_at(&closed_port_url()).complete(messages()).await.unwrap_err();
    assert!(matches!(err, ChatError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn test_prompt_template_fetched_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/prompts/answer.yaml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("system: remote sys\nuser: remote user\n"))
        .mount(&server)
        .await;

    let source = PromptSource::parse(&format!("{}/prompts/answer.yaml", server.uri()));
    let template = source.load(&reqwest::Client::new()).await.unwrap();
    assert_eq!(template.system, "remote sys");
    assert_eq!(template.user, "remote user");
}

#[tokio::test]
async fn test_missing_remote_prompt_is_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = PromptSource::parse(&format!("{}/prompts/answer.yaml", server.uri()));
    let err = source.load(&reqwest::Client::new()).await.unwrap_err();
    assert!(matches!(err, PromptLoadError::Fetch { ref reason, .. } if reason.contains("404")));
}
