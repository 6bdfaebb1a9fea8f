//! Reference lookup for highlighting an answer's source in the document.

use std::sync::Arc;

use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/reference/locate", post(locate))
}

#[derive(Debug, Deserialize)]
struct LocateRequest {
    document: String,
    reference: String,
}

/// POST /api/reference/locate — character offset of a reference, if present.
async fn locate(Json(req): Json<LocateRequest>) -> Json<serde_json::Value> {
    let offset = verifaq_extract::locate_reference(&req.document, &req.reference);
    Json(serde_json::json!({
        "found": offset.is_some(),
        "offset": offset,
    }))
}
