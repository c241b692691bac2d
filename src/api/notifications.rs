//! Handler notifikasi jadwal dan ikhtisar dasbor

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Local;

use super::{blocking, ApiState};
use crate::models::NotifItem;
use crate::services::notifikasi::{kumpulkan_hari_ini, ringkasan, Ringkasan};
use crate::utils::error::AppResult;

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/notifications", get(list))
        .route("/summary", get(summary))
}

/// Jadwal jatuh tempo dan terlewat, tanggal terdekat dulu.
/// Jumlah item dibatasi konfigurasi (bawaan 200).
async fn list(State(state): State<ApiState>) -> AppResult<Json<Vec<NotifItem>>> {
    let db = state.db.clone();
    let daftar = blocking(move || db.asns().find_all()).await?;

    let mut semua = kumpulkan_hari_ini(&daftar).gabung();
    semua.truncate(state.batas_notif);
    Ok(Json(semua))
}

async fn summary(State(state): State<ApiState>) -> AppResult<Json<Ringkasan>> {
    let db = state.db.clone();
    let daftar = blocking(move || db.asns().find_all()).await?;
    Ok(Json(ringkasan(&daftar, Local::now().date_naive())))
}
