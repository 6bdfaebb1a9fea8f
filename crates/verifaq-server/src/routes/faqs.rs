//! FAQ generation routes — pasted text, uploads, export and text rendering.

use std::path::Path;
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use verifaq_core::Error;
use verifaq_extract::{render_text, FaqExport};
use verifaq_ingest::DocumentFormat;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/faqs", post(generate_faqs))
        .route("/faqs/upload", post(upload_document))
        .route("/faqs/export", post(export_faqs))
        .route("/faqs/render", post(render_faqs))
}

#[derive(Debug, Deserialize)]
struct TextRequest {
    text: String,
}

/// POST /api/faqs — generate FAQs from pasted text.
async fn generate_faqs(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TextRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let generation = state.generate(req.text).await?;
    Ok(Json(serde_json::json!({
        "faqs": generation.faqs,
        "warnings": generation.warnings,
        "sentenceCount": generation.sentence_count,
    })))
}

/// POST /api/faqs/upload — generate FAQs from one uploaded file (multipart).
/// The format is taken from the file name's extension.
async fn upload_document(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Decode(format!("Malformed upload: {}", e)))?
    {
        let filename = match field.file_name() {
            Some(name) => name.to_string(),
            None => continue,
        };
        let format = DocumentFormat::from_path(Path::new(&filename))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| Error::Decode(format!("Failed to read {}: {}", filename, e)))?;

        tracing::info!("Received {} ({} bytes, {})", filename, bytes.len(), format);

        let (text, generation) = state.generate_from_bytes(bytes.to_vec(), format).await?;
        return Ok(Json(serde_json::json!({
            "filename": filename,
            "documentLength": text.chars().count(),
            "faqs": generation.faqs,
            "warnings": generation.warnings,
            "sentenceCount": generation.sentence_count,
        })));
    }

    Err(Error::Decode("Upload contained no file field".to_string()).into())
}

/// POST /api/faqs/export — structured export document.
async fn export_faqs(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TextRequest>,
) -> Result<Json<FaqExport>, ApiError> {
    let generation = state.generate(req.text.clone()).await?;
    Ok(Json(FaqExport::new(
        &generation.faqs,
        &req.text,
        chrono::Utc::now(),
    )))
}

/// POST /api/faqs/render — plain-text rendering.
async fn render_faqs(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TextRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let generation = state.generate(req.text).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_text(&generation.faqs),
    ))
}
