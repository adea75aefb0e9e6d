//! 리전 지연 집계 API 핸들러.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use latmon_core::aggregator::aggregate;
use latmon_core::models::report::RegionReport;
use latmon_core::models::telemetry::MetricsRequest;
use serde::Serialize;
use tokio::task::JoinError;
use tracing::{debug, error};

use crate::error::ApiError;
use crate::AppState;

/// 집계 응답 DTO
///
/// `response.wrap_regions` 설정에 따라 매핑을 그대로 내보내거나
/// `{ "regions": ... }`로 감싼다.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LatencyMetricsResponse {
    /// 리전 → 요약 매핑
    Flat(RegionReport),
    /// 최상위 `regions` 키로 감싼 매핑
    Wrapped {
        /// 리전 → 요약 매핑
        regions: RegionReport,
    },
}

impl LatencyMetricsResponse {
    pub fn new(report: RegionReport, wrap_regions: bool) -> Self {
        if wrap_regions {
            Self::Wrapped { regions: report }
        } else {
            Self::Flat(report)
        }
    }
}

/// 리전별 지연 통계 집계
///
/// POST /api/latency-metrics
pub async fn latency_metrics(
    State(state): State<AppState>,
    payload: Result<Json<MetricsRequest>, JsonRejection>,
) -> Result<Json<LatencyMetricsResponse>, ApiError> {
    let Json(request) = payload?;
    let store = state.dataset.store().map_err(ApiError::from)?.clone();

    let MetricsRequest {
        regions,
        threshold_ms,
    } = request;
    let requested = regions.len();

    let report =
        run_isolated(move || aggregate(&store, regions.as_slice(), threshold_ms)).await?;

    debug!(
        "지연 집계 완료: 요청 리전 {}개, 응답 리전 {}개, 임계값 {}ms",
        requested,
        report.len(),
        threshold_ms
    );

    Ok(Json(LatencyMetricsResponse::new(
        report,
        state.response.wrap_regions,
    )))
}

/// 블로킹 풀에서 실행. 작업 중 패닉은 `ApiError::Aggregation`으로 변환된다.
pub(crate) async fn run_isolated<F, T>(task: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task).await.map_err(|e| {
        let detail = join_error_detail(e);
        error!("집계 작업 실패: {}", detail);
        ApiError::Aggregation(detail)
    })
}

fn join_error_detail(err: JoinError) -> String {
    if !err.is_panic() {
        return format!("작업 조인 실패: {err}");
    }

    let payload = err.into_panic();
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "알 수 없는 패닉".to_string());
    format!("집계 중 패닉: {message}")
}
