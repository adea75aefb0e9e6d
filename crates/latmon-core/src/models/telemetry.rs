//! 텔레메트리 모델.
//!
//! 리전별 지연/가용성 관측 레코드와 집계 요청을 정의.

use serde::{Deserialize, Serialize};

/// 단일 관측 레코드
///
/// 데이터셋의 알 수 없는 필드(`service`, `timestamp` 등)는 무시한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// 리전 식별자 (예: "us-east", "apac")
    pub region: String,
    /// 지연 시간 (밀리초, 0 이상)
    pub latency_ms: f64,
    /// 가용성 (퍼센트, 0~100)
    #[serde(alias = "uptime_pct")]
    pub uptime: f64,
}

impl TelemetryRecord {
    /// 새 레코드 생성
    pub fn new(region: impl Into<String>, latency_ms: f64, uptime: f64) -> Self {
        Self {
            region: region.into(),
            latency_ms,
            uptime,
        }
    }
}

/// 리전 집계 요청
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsRequest {
    /// 조회할 리전 목록 (순서 유지, 중복 허용)
    pub regions: Vec<String>,
    /// 위반 판정 임계값 (밀리초)
    pub threshold_ms: i64,
}
