//! # latmon-web
//!
//! 리전 지연 집계 HTTP 서버.
//! Axum 기반 REST API.
//!
//! ## 기능
//! - 리전별 지연/가용성 집계 (`POST /api/latency-metrics`)
//! - 데이터셋 상태 조회 (`GET /api/health`)
//! - 브라우저 호출용 CORS (모든 origin, POST만 허용)

pub mod error;
pub mod handlers;
pub mod routes;

use axum::http::Method;
use axum::Router;
use latmon_core::config::{ResponseConfig, WebConfig};
use latmon_core::store::DatasetState;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// 웹 서버 애플리케이션 상태
#[derive(Clone)]
pub struct AppState {
    /// 데이터셋 (로드 완료 또는 캐시된 실패)
    pub dataset: DatasetState,
    /// 응답 형태 설정
    pub response: ResponseConfig,
}

/// 상태를 주입한 전체 라우터 생성
///
/// CORS: 모든 origin, POST만 허용, 모든 요청 헤더 허용, 모든 응답 헤더 노출.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST])
        .allow_headers(Any)
        .expose_headers(Any);

    Router::new()
        .nest("/api", routes::api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 지연 집계 HTTP 서버
pub struct WebServer {
    config: WebConfig,
    state: AppState,
}

impl WebServer {
    /// 새 웹 서버 생성
    pub fn new(dataset: DatasetState, config: WebConfig) -> Self {
        Self {
            config,
            state: AppState {
                dataset,
                response: ResponseConfig::default(),
            },
        }
    }

    /// 응답 형태 설정
    pub fn with_response_config(mut self, response: ResponseConfig) -> Self {
        self.state.response = response;
        self
    }

    /// 라우터 반환 (테스트용)
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// 서버 실행
    ///
    /// 기본 포트에서 시작하여, 포트가 이미 사용 중이면 다음 포트를 시도합니다.
    /// `max_port_attempts`개 포트를 시도한 후 실패하면 에러를 반환합니다.
    ///
    /// # Arguments
    /// * `shutdown_rx` - 종료 신호 수신 채널
    ///
    /// # Returns
    /// 성공 시 `Ok(())`, 모든 포트 바인드 실패 시 `Err`
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) -> Result<(), std::io::Error> {
        let host = if self.config.allow_external {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };

        if !self.state.dataset.is_ready() {
            warn!("데이터셋 없이 저하 모드로 서버 시작, 집계 요청은 500 응답");
        }

        let app = build_router(self.state);

        // 포트 바인드 시도 (최대 max_port_attempts번)
        let base_port = self.config.port;
        let attempts = self.config.max_port_attempts.max(1);
        let mut last_error = None;

        for attempt in 0..attempts {
            let port = base_port.saturating_add(attempt);

            // 포트 오버플로우 체크 (u16::MAX에서 포화되면 중단)
            if attempt > 0 && port == base_port.saturating_add(attempt - 1) {
                break;
            }

            let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
                Ok(a) => a,
                Err(e) => {
                    error!("잘못된 주소 {}:{}: {}", host, port, e);
                    continue; // 다음 포트 시도
                }
            };

            match TcpListener::bind(addr).await {
                Ok(listener) => {
                    // 기본 포트가 아닌 경우 경고 로그
                    if attempt > 0 {
                        warn!("포트 {} 사용 불가, 대체 포트 {} 사용", base_port, port);
                    }
                    info!("지연 집계 서버 시작: http://{}", addr);

                    // Graceful shutdown과 함께 서버 실행
                    axum::serve(listener, app)
                        .with_graceful_shutdown(async move {
                            loop {
                                if *shutdown_rx.borrow() {
                                    info!("웹 서버 종료 신호 수신");
                                    break;
                                }
                                if shutdown_rx.changed().await.is_err() {
                                    break;
                                }
                            }
                        })
                        .await?;

                    info!("지연 집계 서버 종료");
                    return Ok(());
                }
                Err(e) => {
                    // AddrInUse 에러인 경우 다음 포트 시도
                    if e.kind() == std::io::ErrorKind::AddrInUse {
                        warn!("포트 {} 이미 사용 중, 다음 포트 시도...", port);
                        last_error = Some(e);
                        continue;
                    }
                    // 다른 에러는 즉시 반환
                    return Err(e);
                }
            }
        }

        // 모든 시도 실패
        Err(last_error.unwrap_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::AddrInUse,
                format!(
                    "포트 {}-{} 모두 사용 불가",
                    base_port,
                    base_port.saturating_add(attempts - 1)
                ),
            )
        }))
    }

    /// 서버 URL 반환
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.config.port)
    }
}
