//! Route handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

use docintel::{AskResponse, PreconditionError, ServiceError};

use super::app::AppState;
use super::response::ApiError;

/// Multipart field holding the document.
const FILE_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub(crate) struct AskRequest {
    question: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct UploadResponse {
    message: &'static str,
    chunks_indexed: usize,
}

/// Health check and endpoint listing.
pub(crate) async fn index(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Autonomous Document Intelligence Agent",
        "documents_loaded": state.service.has_documents(),
        "endpoints": {
            "POST /upload": "Upload a PDF, TXT or MD document (multipart field `file`)",
            "POST /ask": "Ask a question about the uploaded document",
        },
    }))
}

/// Indexes the multipart `file` field, replacing the current index.
pub(crate) async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let mut document = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request("invalid_upload", e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request("invalid_upload", e.body_text()))?;
        document = Some((filename, bytes));
        break;
    }
    let Some((filename, bytes)) = document else {
        return Err(ApiError::bad_request(
            "missing_file",
            format!("multipart field `{}` is required", FILE_FIELD),
        ));
    };
    if bytes.is_empty() {
        return Err(ServiceError::from(PreconditionError::EmptyDocument).into());
    }

    let result = state.service.upload(bytes.to_vec(), &filename).await?;
    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "Document processed successfully",
            chunks_indexed: result.chunks_indexed,
        }),
    ))
}

/// Runs the pipeline on a separate task; if the client goes away, the handler future is
/// dropped and the run stops before its next stage.
pub(crate) async fn ask(
    State(state): State<AppState>,
    body: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::bad_request("invalid_request", e.body_text()))?;

    let token = CancellationToken::new();
    let _cancel_on_drop = token.clone().drop_guard();
    let service = state.service.clone();
    let run = tokio::spawn(async move { service.ask_with_cancel(&request.question, &token).await });

    let response = run
        .await
        .map_err(|e| ApiError::internal(format!("pipeline task failed: {}", e)))??;
    Ok(Json(response))
}
