//! API 에러 처리.
//!
//! 모든 실패 응답은 `{ "error": 요약, "debug": 진단 상세 }` 형태다.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use latmon_core::store::LoadFailure;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// API 에러
#[derive(Debug, Error)]
pub enum ApiError {
    /// 데이터셋 로드 실패 (시작 시 캐시된 에러)
    #[error("데이터셋 사용 불가: {summary}")]
    DatasetUnavailable {
        /// 사용자용 요약
        summary: String,
        /// 진단 상세
        debug: String,
    },

    /// 집계 중 예상치 못한 오류
    #[error("집계 실패: {0}")]
    Aggregation(String),

    /// 요청 본문 형식 오류
    #[error("잘못된 요청: {0}")]
    InvalidRequest(String),
}

/// 에러 응답 본문
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 에러 요약
    pub error: String,
    /// 진단 상세
    pub debug: String,
}

impl ApiError {
    /// HTTP 상태 코드
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::DatasetUnavailable { .. } | ApiError::Aggregation(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::DatasetUnavailable { summary, debug } => ErrorResponse {
                error: summary,
                debug,
            },
            ApiError::Aggregation(debug) => ErrorResponse {
                error: "Failed to aggregate telemetry".to_string(),
                debug,
            },
            ApiError::InvalidRequest(debug) => ErrorResponse {
                error: "Invalid request body".to_string(),
                debug,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<&LoadFailure> for ApiError {
    fn from(failure: &LoadFailure) -> Self {
        ApiError::DatasetUnavailable {
            summary: failure.summary.clone(),
            debug: failure.detail.clone(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("요청 본문 거부: {}", rejection.body_text());
        ApiError::InvalidRequest(rejection.body_text())
    }
}
