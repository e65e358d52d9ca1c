//! OpenAI adapter against a local chat completion stub

use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
use meet_insights::adapters::services::llm::OpenAIService;
use meet_insights::domain::analysis::analyze_transcript;
use meet_insights::domain::models::Sentiment;
use meet_insights::error::AppError;
use meet_insights::ports::llm::{CompletionRequest, LlmConfig, LlmServicePort};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    reply: Value,
    seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn chat_completions(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    stub.seen.lock().unwrap().push((auth, body));
    (stub.status, Json(stub.reply.clone()))
}

/// Starts a stub server and returns its base URL
async fn spawn_stub(stub: Stub) -> String {
    let app = Router::new()
        .route("/v1/chat/completions", post(chat_completions))
        .with_state(stub);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/v1/", addr)
}

fn stub(status: StatusCode, reply: Value) -> Stub {
    Stub {
        status,
        reply,
        seen: Arc::new(Mutex::new(Vec::new())),
    }
}

fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
}

fn service(base_url: &str) -> OpenAIService {
    OpenAIService::with_options("sk-test".to_string(), base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_complete_sends_chat_request() {
    let stub = stub(StatusCode::OK, completion("hello"));
    let seen = stub.seen.clone();
    let base = spawn_stub(stub).await;

    let request = CompletionRequest::new(Some("be brief"), "say hello".to_string());
    let reply = service(&base)
        .complete(&request, &LlmConfig::default())
        .await
        .unwrap();
    assert_eq!(reply, "hello");

    let seen = seen.lock().unwrap();
    let (auth, body) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
    assert_eq!(body["model"], "gpt-3.5-turbo");
    assert_eq!(body["max_tokens"], 2000);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], "be brief");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "say hello");
}

#[tokio::test]
async fn test_upstream_error_status() {
    let base = spawn_stub(stub(
        StatusCode::TOO_MANY_REQUESTS,
        json!({"error": {"message": "rate limited"}}),
    ))
    .await;

    let err = service(&base)
        .complete(&CompletionRequest::new(None, "x".to_string()), &LlmConfig::default())
        .await
        .unwrap_err();
    match err {
        AppError::Llm(msg) => {
            assert!(msg.contains("429"));
            assert!(msg.contains("rate limited"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_choices_is_error() {
    let base = spawn_stub(stub(StatusCode::OK, json!({"choices": []}))).await;

    let err = service(&base)
        .complete(&CompletionRequest::new(None, "x".to_string()), &LlmConfig::default())
        .await
        .unwrap_err();
    assert_eq!(err.client_message(), "분석 결과를 받을 수 없습니다.");
}

#[tokio::test]
async fn test_analysis_through_adapter() {
    let reply = json!({
        "summary": "배포 일정 확정",
        "keyPoints": ["금요일 배포"],
        "actionItems": [{"task": "릴리스 노트 작성"}],
        "participants": ["김", "이"],
        "keywords": ["배포"],
        "sentiment": "negative",
        "nextSteps": "배포 후 모니터링",
        "shareableText": "배포 준비 완료"
    });
    let stub = stub(StatusCode::OK, completion(&reply.to_string()));
    let seen = stub.seen.clone();
    let base = spawn_stub(stub).await;

    let result = analyze_transcript(&service(&base), "회의록 본문", &LlmConfig::default())
        .await
        .unwrap();
    assert_eq!(result.summary, "배포 일정 확정");
    assert_eq!(result.sentiment, Sentiment::Negative);
    assert!(result.action_items[0].assignee.is_none());

    let seen = seen.lock().unwrap();
    let prompt = seen[0].1["messages"][1]["content"].as_str().unwrap();
    assert!(prompt.contains("회의록 본문"));
}
