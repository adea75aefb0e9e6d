//! API 라우트 정의.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::AppState;

/// API 라우트 생성
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // 리전 지연 집계
        .route(
            "/latency-metrics",
            post(handlers::latency::latency_metrics),
        )
        // 헬스 체크
        .route("/health", get(handlers::health::health_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use latmon_core::config::ResponseConfig;
    use latmon_core::store::{DatasetState, TelemetryStore};

    #[test]
    fn routes_compile() {
        let store = TelemetryStore::from_records(Vec::new(), "empty").unwrap();
        let state = AppState {
            dataset: DatasetState::ready(store),
            response: ResponseConfig::default(),
        };
        let _app: Router<()> = api_routes().with_state(state);
    }
}
