//! Handler CRUD data pegawai

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Local;
use serde::Deserialize;

use super::{blocking, ApiState};
use crate::models::{Asn, AsnInput, AsnPatch, StatusJadwal};
use crate::services::notifikasi::status_asn;
use crate::utils::error::{AppError, AppResult};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/records", get(list).post(create))
        .route(
            "/records/{id}",
            get(get_by_id).put(update).patch(update).delete(remove),
        )
}

/// Parameter penyaringan daftar
#[derive(Debug, Default, Deserialize)]
struct ParamDaftar {
    /// Kata kunci nama/NIP
    q: Option<String>,
    /// Saring menurut status jadwal terdekat
    status: Option<StatusJadwal>,
}

async fn list(
    State(state): State<ApiState>,
    Query(param): Query<ParamDaftar>,
) -> AppResult<Json<Vec<Asn>>> {
    let ParamDaftar { q, status } = param;

    let db = state.db.clone();
    let mut daftar = blocking(move || {
        let repo = db.asns();
        match q.as_deref() {
            Some(kata) => repo.search(kata),
            None => repo.find_all(),
        }
    })
    .await?;

    if let Some(status) = status {
        let hari_ini = Local::now().date_naive();
        daftar.retain(|asn| status_asn(asn, hari_ini) == status);
    }

    Ok(Json(daftar))
}

async fn create(
    State(state): State<ApiState>,
    Json(input): Json<AsnInput>,
) -> AppResult<(StatusCode, Json<Asn>)> {
    let db = state.db.clone();
    let asn = blocking(move || db.asns().create(input)).await?;
    Ok((StatusCode::CREATED, Json(asn)))
}

async fn get_by_id(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Asn>> {
    let db = state.db.clone();
    let asn = blocking(move || db.asns().find_by_id(id))
        .await?
        .ok_or_else(|| AppError::not_found(format!("ASN dengan id {}", id)))?;
    Ok(Json(asn))
}

async fn update(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Json(patch): Json<AsnPatch>,
) -> AppResult<Json<Asn>> {
    let db = state.db.clone();
    let asn = blocking(move || db.asns().update(id, patch)).await?;
    Ok(Json(asn))
}

async fn remove(State(state): State<ApiState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    let db = state.db.clone();
    blocking(move || db.asns().delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
