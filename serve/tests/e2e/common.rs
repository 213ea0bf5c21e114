//! Shared helpers: build a mock-backed service and spawn the server on a random port.

use std::sync::Arc;

use docintel::{
    DocIntelligence, DocumentIndex, HashEmbedder, LlmClient, MockLlm, PipelineConfig,
    PipelineLlms, RecursiveSplitter, StagePrompts,
};
use serve::ServeConfig;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub const POLICY: &str = "Refunds are issued within 30 days of purchase.\n\n\
Shipping is free for orders over 50 euros.";

/// Running server; dropping it shuts the server down.
pub struct TestServer {
    pub base_url: String,
    _shutdown: oneshot::Sender<()>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Same mock for every stage.
pub fn service_with(llm: MockLlm) -> DocIntelligence {
    service_with_llms(PipelineLlms::uniform(Arc::new(llm) as Arc<dyn LlmClient>))
}

pub fn service_with_llms(llms: PipelineLlms) -> DocIntelligence {
    let config = PipelineConfig::default();
    let index = Arc::new(DocumentIndex::new(
        Arc::new(HashEmbedder::default()),
        RecursiveSplitter::new(config.chunk_size, config.chunk_overlap),
    ));
    DocIntelligence::build(llms, Arc::new(StagePrompts::default()), index, &config, None)
        .expect("document graph compiles")
}

/// Bind to a random port and spawn the server. Returns once the listener is bound.
pub async fn spawn_server(service: DocIntelligence) -> TestServer {
    spawn_server_with(service, ServeConfig::default()).await
}

pub async fn spawn_server_with(service: DocIntelligence, config: ServeConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(serve::run_serve_on_listener(listener, service, config, async move {
        let _ = rx.await;
    }));
    TestServer {
        base_url: format!("http://{}", addr),
        _shutdown: tx,
    }
}

pub fn file_form(bytes: Vec<u8>, filename: &str) -> reqwest::multipart::Form {
    reqwest::multipart::Form::new().part(
        "file",
        reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string()),
    )
}

/// Uploads [`POLICY`] as `policy.txt` and asserts it was indexed.
pub async fn upload_policy(client: &reqwest::Client, server: &TestServer) {
    let resp = client
        .post(server.url("/upload"))
        .multipart(file_form(POLICY.as_bytes().to_vec(), "policy.txt"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
}
