//! 인메모리 텔레메트리 소스.

use async_trait::async_trait;
use latmon_core::error::CoreError;
use latmon_core::models::telemetry::TelemetryRecord;
use latmon_core::ports::telemetry_source::TelemetrySource;

/// 미리 준비된 레코드를 그대로 반환하는 소스
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<TelemetryRecord>,
}

impl InMemorySource {
    pub fn new(records: Vec<TelemetryRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl TelemetrySource for InMemorySource {
    async fn load_records(&self) -> Result<Vec<TelemetryRecord>, CoreError> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("memory ({} records)", self.records.len())
    }
}
