//! 텔레메트리 저장소.
//!
//! 프로세스 시작 시 한 번 로드되고 이후 변경되지 않는 레코드 집합.
//! 읽기 전용이므로 `Arc`로 공유하며 잠금이 필요 없다.
//!
//! 로드 실패는 프로세스를 종료시키지 않는다. [`DatasetState::Failed`]에
//! 캐시되어 이후 모든 집계 요청에 동일한 에러로 보고된다.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use crate::error::CoreError;
use crate::models::telemetry::TelemetryRecord;
use crate::ports::telemetry_source::TelemetrySource;

/// 가용성 허용 상한 (퍼센트 스케일)
pub const MAX_UPTIME: f64 = 100.0;

/// 불변 텔레메트리 레코드 집합
#[derive(Debug)]
pub struct TelemetryStore {
    records: Vec<TelemetryRecord>,
    source: String,
    loaded_at: DateTime<Utc>,
}

impl TelemetryStore {
    /// 레코드 검증 후 저장소 생성
    ///
    /// 잘못된 레코드가 하나라도 있으면 전체를 거부한다.
    pub fn from_records(
        records: Vec<TelemetryRecord>,
        source: impl Into<String>,
    ) -> Result<Self, CoreError> {
        for (index, record) in records.iter().enumerate() {
            validate_record(index, record)?;
        }

        Ok(Self {
            records,
            source: source.into(),
            loaded_at: Utc::now(),
        })
    }

    /// 데이터 소스에서 로드
    pub async fn load(source: &dyn TelemetrySource) -> Result<Self, CoreError> {
        let description = source.describe();
        debug!("텔레메트리 로드 시작: {}", description);

        let records = source.load_records().await?;
        let store = Self::from_records(records, description)?;

        info!(
            "텔레메트리 로드 완료: {} ({}건, 리전 {}개)",
            store.source,
            store.len(),
            store.region_count()
        );
        Ok(store)
    }

    /// 타임아웃을 적용해 로드
    pub async fn load_with_timeout(
        source: &dyn TelemetrySource,
        timeout: Duration,
    ) -> Result<Self, CoreError> {
        match tokio::time::timeout(timeout, Self::load(source)).await {
            Ok(result) => result,
            Err(_) => Err(CoreError::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            }),
        }
    }

    /// 전체 레코드 (로드 순서)
    pub fn records(&self) -> &[TelemetryRecord] {
        &self.records
    }

    /// 특정 리전의 레코드 (정확히 일치, 대소문자 구분)
    pub fn records_for<'a>(
        &'a self,
        region: &'a str,
    ) -> impl Iterator<Item = &'a TelemetryRecord> + 'a {
        self.records.iter().filter(move |r| r.region == region)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 서로 다른 리전 수
    pub fn region_count(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.region.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// 소스 설명
    pub fn source(&self) -> &str {
        &self.source
    }

    /// 로드 시각
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

fn validate_record(index: usize, record: &TelemetryRecord) -> Result<(), CoreError> {
    let invalid = |field: &str, message: String| CoreError::Validation {
        field: format!("records[{index}].{field}"),
        message,
    };

    if record.region.is_empty() {
        return Err(invalid("region", "빈 리전 식별자".to_string()));
    }
    if !record.latency_ms.is_finite() || record.latency_ms < 0.0 {
        return Err(invalid(
            "latency_ms",
            format!("0 이상의 유한한 값이어야 함: {}", record.latency_ms),
        ));
    }
    if !record.uptime.is_finite() || !(0.0..=MAX_UPTIME).contains(&record.uptime) {
        return Err(invalid(
            "uptime",
            format!("0~{MAX_UPTIME} 범위여야 함: {}", record.uptime),
        ));
    }
    Ok(())
}

/// 캐시된 로드 실패
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    /// 사용자용 요약
    pub summary: String,
    /// 진단 상세 (소스 + 원인)
    pub detail: String,
}

impl LoadFailure {
    /// 코어 에러로부터 생성
    pub fn from_error(source: &str, err: &CoreError) -> Self {
        Self {
            summary: err.summary().to_string(),
            detail: format!("{source}: {err}"),
        }
    }
}

/// 데이터셋 상태 (로드 성공 또는 캐시된 실패)
#[derive(Debug, Clone)]
pub enum DatasetState {
    /// 로드 완료
    Ready(Arc<TelemetryStore>),
    /// 로드 실패 (재시도 없음)
    Failed(Arc<LoadFailure>),
}

impl DatasetState {
    /// 시작 시 한 번 로드하고 결과를 상태로 고정
    pub async fn initialize(source: &dyn TelemetrySource, timeout: Duration) -> Self {
        let description = source.describe();
        match TelemetryStore::load_with_timeout(source, timeout).await {
            Ok(store) => Self::Ready(Arc::new(store)),
            Err(e) => {
                error!("텔레메트리 로드 실패, 저하 모드로 시작: {}: {}", description, e);
                Self::Failed(Arc::new(LoadFailure::from_error(&description, &e)))
            }
        }
    }

    /// 이미 로드된 저장소로 생성
    pub fn ready(store: TelemetryStore) -> Self {
        Self::Ready(Arc::new(store))
    }

    /// 저장소 반환, 실패 상태면 캐시된 에러 반환
    pub fn store(&self) -> Result<&Arc<TelemetryStore>, &LoadFailure> {
        match self {
            Self::Ready(store) => Ok(store),
            Self::Failed(failure) => Err(failure),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}
