//! JSON 파일 텔레메트리 소스.
//!
//! 데이터셋은 레코드 객체의 JSON 배열이다. 한 레코드라도 형식이 맞지
//! 않으면 전체 로드가 실패한다.

use async_trait::async_trait;
use latmon_core::error::CoreError;
use latmon_core::models::telemetry::TelemetryRecord;
use latmon_core::ports::telemetry_source::TelemetrySource;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// JSON 배열 파일 소스
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// 새 파일 소스 생성
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 파일 경로 반환
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// JSON 텍스트 파싱
    pub fn parse(content: &str) -> Result<Vec<TelemetryRecord>, CoreError> {
        serde_json::from_str(content).map_err(|e| CoreError::Parse {
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
        })
    }
}

#[async_trait]
impl TelemetrySource for JsonFileSource {
    async fn load_records(&self) -> Result<Vec<TelemetryRecord>, CoreError> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                CoreError::SourceNotFound(self.path.display().to_string())
            } else {
                CoreError::Io(e)
            }
        })?;

        debug!(
            "데이터셋 파일 읽기 완료: {} ({} bytes)",
            self.path.display(),
            content.len()
        );
        Self::parse(&content)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
