//! 텔레메트리 데이터 소스 포트.
//!
//! 구현: `latmon-storage` crate (JSON 파일, 인메모리)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::telemetry::TelemetryRecord;

/// 텔레메트리 레코드 공급자
///
/// 프로세스 시작 시 한 번만 호출된다.
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// 전체 레코드를 순서대로 읽기
    async fn load_records(&self) -> Result<Vec<TelemetryRecord>, CoreError>;

    /// 진단용 소스 설명 (파일 경로 등)
    fn describe(&self) -> String;
}
