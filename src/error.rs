//! Error Handling Module
//!
//! Maps oracle and aggregation failures onto HTTP responses.
//! Uses thiserror for domain errors and integrates with tracing for structured logging.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::{AggregationError, OracleError};

/// API 에러 타입
///
/// 요청 단위로 종료되는 에러이며 프로세스는 계속 동작함.
/// 클라이언트에는 메시지 문자열만 전달 (에러 코드 없음)
#[derive(Debug, Error)]
pub enum ApiError {
    // ============ 500 Internal Server Error ============
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}

/// API 에러 응답 구조
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Oracle(_) | ApiError::Aggregation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!("Price request failed: {}", self);

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
