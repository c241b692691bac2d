//! Ekspor dan impor data JSON
//!
//! Pengganti dialog berkas pada versi peramban: seluruh data pegawai
//! dapat diunduh sebagai satu larik JSON dan dimuat kembali. Impor
//! mempertahankan id kiriman dan berjalan dalam satu transaksi.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::info;

use super::{blocking, ApiState};
use crate::models::Asn;
use crate::utils::error::AppResult;

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/export", get(ekspor))
        .route("/import", post(impor))
}

async fn ekspor(State(state): State<ApiState>) -> AppResult<Json<Vec<Asn>>> {
    let db = state.db.clone();
    let daftar = blocking(move || db.asns().find_all()).await?;
    Ok(Json(daftar))
}

async fn impor(
    State(state): State<ApiState>,
    Json(daftar): Json<Vec<Asn>>,
) -> AppResult<Json<Value>> {
    let db = state.db.clone();
    let jumlah = blocking(move || db.asns().import_bulk(daftar)).await?;

    info!("Impor selesai: {} baris", jumlah);
    Ok(Json(json!({ "diimpor": jumlah })))
}
