use std::sync::Arc;

use docintel::{LlmClient, MockLlm, PipelineLlms};
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::common::{service_with, service_with_llms, spawn_server, upload_policy};

#[tokio::test]
async fn ask_before_upload_is_bad_request_with_no_documents_kind() {
    let llm = Arc::new(MockLlm::with_content("FINAL"));
    let server = spawn_server(service_with_llms(PipelineLlms::uniform(
        llm.clone() as Arc<dyn LlmClient>
    )))
    .await;
    let resp = reqwest::Client::new()
        .post(server.url("/ask"))
        .json(&json!({ "question": "What is the refund window?" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "no_documents");
    assert_eq!(
        body["error"],
        "No documents loaded. Please upload a PDF first via POST /upload"
    );
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn blank_question_is_bad_request() {
    let server = spawn_server(service_with(MockLlm::with_content("FINAL"))).await;
    let client = reqwest::Client::new();
    upload_policy(&client, &server).await;

    let resp = client
        .post(server.url("/ask"))
        .json(&json!({ "question": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "empty_question");
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let server = spawn_server(service_with(MockLlm::with_content("FINAL"))).await;
    let resp = reqwest::Client::new()
        .post(server.url("/ask"))
        .header("content-type", "application/json")
        .body("{\"q\": 1}")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "invalid_request");
}

#[tokio::test]
async fn ask_returns_answer_plan_and_iterations() {
    let llms = PipelineLlms {
        planner: Arc::new(MockLlm::with_content("1. read the policy")),
        analyst: Arc::new(MockLlm::with_content("30 days")),
        writer: Arc::new(MockLlm::scripted(["Refunds: 30 days.", "Refunds take 30 days."])),
        critic: Arc::new(MockLlm::scripted(["IMPROVE: full sentence", "FINAL"])),
    };
    let server = spawn_server(service_with_llms(llms)).await;
    let client = reqwest::Client::new();
    upload_policy(&client, &server).await;

    let resp = client
        .post(server.url("/ask"))
        .json(&json!({ "question": "  How long do refunds take?  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "answer": "Refunds take 30 days.",
            "plan": "1. read the policy",
            "iterations": 2,
        })
    );
}

#[tokio::test]
async fn generation_failure_is_bad_gateway_naming_stage() {
    let llms = PipelineLlms {
        writer: Arc::new(MockLlm::failing("upstream 500")),
        ..PipelineLlms::uniform(Arc::new(MockLlm::with_content("FINAL")))
    };
    let server = spawn_server(service_with_llms(llms)).await;
    let client = reqwest::Client::new();
    upload_policy(&client, &server).await;

    let resp = client
        .post(server.url("/ask"))
        .json(&json!({ "question": "How long do refunds take?" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "generation_failed");
    assert!(
        body["error"].as_str().unwrap_or_default().contains("writer"),
        "{}",
        body
    );
}
