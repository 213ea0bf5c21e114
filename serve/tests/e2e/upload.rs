use docintel::MockLlm;
use reqwest::StatusCode;
use serde_json::Value;
use serve::ServeConfig;

use crate::common::{file_form, service_with, spawn_server, spawn_server_with, POLICY};

#[tokio::test]
async fn upload_text_document_returns_created_with_chunk_count() {
    let server = spawn_server(service_with(MockLlm::with_content("FINAL"))).await;
    let resp = reqwest::Client::new()
        .post(server.url("/upload"))
        .multipart(file_form(POLICY.as_bytes().to_vec(), "policy.md"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Document processed successfully");
    assert_eq!(body["chunks_indexed"], 1);
}

#[tokio::test]
async fn empty_file_is_bad_request() {
    let server = spawn_server(service_with(MockLlm::with_content("FINAL"))).await;
    let resp = reqwest::Client::new()
        .post(server.url("/upload"))
        .multipart(file_form(Vec::new(), "policy.pdf"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "empty_document");
    assert_eq!(body["error"], "Empty file");
}

#[tokio::test]
async fn unsupported_file_type_is_415() {
    let server = spawn_server(service_with(MockLlm::with_content("FINAL"))).await;
    let resp = reqwest::Client::new()
        .post(server.url("/upload"))
        .multipart(file_form(b"<html></html>".to_vec(), "page.html"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "unsupported_document");
}

#[tokio::test]
async fn missing_file_field_is_bad_request() {
    let server = spawn_server(service_with(MockLlm::with_content("FINAL"))).await;
    let form = reqwest::multipart::Form::new().text("note", "no file here");
    let resp = reqwest::Client::new()
        .post(server.url("/upload"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "missing_file");
}

#[tokio::test]
async fn corrupt_pdf_is_server_error() {
    let server = spawn_server(service_with(MockLlm::with_content("FINAL"))).await;
    let resp = reqwest::Client::new()
        .post(server.url("/upload"))
        .multipart(file_form(b"%PDF-1.4 truncated".to_vec(), "broken.pdf"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["kind"], "indexing_failed");
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let server = spawn_server_with(
        service_with(MockLlm::with_content("FINAL")),
        ServeConfig {
            max_upload_bytes: 64,
        },
    )
    .await;
    let resp = reqwest::Client::new()
        .post(server.url("/upload"))
        .multipart(file_form(vec![b'a'; 4096], "big.txt"))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_client_error(), "{}", resp.status());
}
