//! Lapisan HTTP (axum) di atas penyimpanan.
//!
//! # Daftar rute
//!
//! | Path | Metode | Keterangan |
//! |------|--------|------------|
//! | /records | GET, POST | daftar (opsi `?q=` dan `?status=`) dan pembuatan |
//! | /records/{id} | GET, PUT, PATCH, DELETE | operasi per pegawai |
//! | /notifications | GET | jadwal jatuh tempo, terdekat dulu, dibatasi |
//! | /summary | GET | angka ikhtisar dasbor |
//! | /export, /import | GET, POST | transfer data JSON |
//! | /health | GET | pemeriksaan kesehatan penyimpanan |
//!
//! Badan galat selalu `{"error": pesan}`; penamaan field mengikuti model
//! kanonis (snake_case).

pub mod health;
pub mod notifications;
pub mod records;
pub mod transfer;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::db::Database;
use crate::utils::error::{AppError, AppResult};

/// State bersama seluruh handler
#[derive(Clone)]
pub struct ApiState {
    pub db: Database,
    /// Batas jumlah item pada /notifications
    pub batas_notif: usize,
}

/// Rakit seluruh router aplikasi
pub fn router(state: ApiState) -> Router {
    Router::new()
        .merge(records::router())
        .merge(notifications::router())
        .merge(transfer::router())
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Jalankan pekerjaan rusqlite (blocking) di luar executor async
pub(crate) async fn blocking<T, F>(f: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(hasil) => hasil,
        Err(e) => Err(AppError::other(format!("tugas blocking gagal: {}", e))),
    }
}
