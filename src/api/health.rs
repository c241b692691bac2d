//! Pemeriksaan kesehatan
//!
//! Menjalankan satu kueri kecil untuk membuktikan penyimpanan masih
//! dapat dijangkau; gagal berarti 500 dengan `{"ok": false, ...}`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use super::{blocking, ApiState};

pub fn router() -> Router<ApiState> {
    Router::new().route("/health", get(health))
}

async fn health(State(state): State<ApiState>) -> (StatusCode, Json<Value>) {
    let db = state.db.clone();
    match blocking(move || db.now()).await {
        Ok(now) => (
            StatusCode::OK,
            Json(json!({
                "ok": true,
                "now": now,
                "version": env!("CARGO_PKG_VERSION"),
            })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "ok": false, "error": e.to_string() })),
        ),
    }
}
