use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Kesalahan basis data: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Kesalahan IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validasi gagal: {0}")]
    Validation(String),

    #[error("Tidak ditemukan: {0}")]
    NotFound(String),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Pemetaan ke respons HTTP: validasi 400, tidak ditemukan 404,
/// kegagalan penyimpanan 500. Badan respons selalu `{"error": pesan}`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Io(_) | AppError::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            error!("{}", self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::validation("nama kosong").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("id 9").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::other("lainnya").into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
