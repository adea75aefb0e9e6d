//! 헬스 체크 API 핸들러.
//!
//! 데이터셋 로드에 실패해도 서버는 응답하며, 이 엔드포인트로
//! 저하 상태와 원인을 확인할 수 있다.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use latmon_core::store::DatasetState;
use serde::Serialize;

use crate::AppState;

/// 헬스 응답 DTO
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum HealthResponse {
    /// 데이터셋 정상 로드
    Ok {
        /// 레코드 수
        records: usize,
        /// 리전 수
        regions: usize,
        /// 데이터 소스
        source: String,
        /// 로드 시각 (RFC3339)
        loaded_at: String,
    },
    /// 데이터셋 로드 실패
    Degraded {
        /// 에러 요약
        error: String,
        /// 진단 상세
        debug: String,
    },
}

impl HealthResponse {
    /// 데이터셋 상태로부터 응답 생성
    pub fn from_dataset(dataset: &DatasetState) -> (StatusCode, Self) {
        match dataset.store() {
            Ok(store) => (
                StatusCode::OK,
                Self::Ok {
                    records: store.len(),
                    regions: store.region_count(),
                    source: store.source().to_string(),
                    loaded_at: store.loaded_at().to_rfc3339(),
                },
            ),
            Err(failure) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Self::Degraded {
                    error: failure.summary.clone(),
                    debug: failure.detail.clone(),
                },
            ),
        }
    }
}

/// 서비스 상태 조회
///
/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, body) = HealthResponse::from_dataset(&state.dataset);
    (status, Json(body))
}
