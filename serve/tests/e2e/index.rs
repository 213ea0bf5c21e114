use docintel::MockLlm;
use serde_json::Value;

use crate::common::{service_with, spawn_server, upload_policy};

#[tokio::test]
async fn index_reports_status_and_document_state() {
    let server = spawn_server(service_with(MockLlm::with_content("FINAL"))).await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["documents_loaded"], false);
    assert!(body["endpoints"]["POST /ask"].is_string());

    upload_policy(&client, &server).await;
    let body: Value = client
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["documents_loaded"], true);
}
