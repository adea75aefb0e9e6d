//! LATMON 핵심 에러 타입.
//!
//! 어댑터 crate는 자체 에러 타입에서 `CoreError`를 변환해 사용한다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 데이터셋 로드, 설정, 유효성 검증 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패 (위치 정보 없음)
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 데이터셋 파싱 실패 (줄/열 위치 포함)
    #[error("데이터셋 파싱 실패 ({line}:{column}): {message}")]
    Parse {
        /// 파서 메시지
        message: String,
        /// 1부터 시작하는 줄 번호
        line: usize,
        /// 1부터 시작하는 열 번호
        column: usize,
    },

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 ({field}): {message}")]
    Validation {
        /// 검증 실패한 필드명 (레코드 인덱스 포함)
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 데이터 소스를 찾을 수 없음
    #[error("데이터 소스 미발견: {0}")]
    SourceNotFound(String),

    /// 로드 타임아웃
    #[error("로드 타임아웃: {timeout_ms}ms 초과")]
    Timeout {
        /// 초과된 타임아웃 시간 (밀리초)
        timeout_ms: u64,
    },

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// 사용자에게 보여줄 한 줄 요약.
    ///
    /// 세부 사항은 `Display` 구현(`to_string()`)이 담당한다.
    pub fn summary(&self) -> &'static str {
        match self {
            CoreError::Serialization(_) | CoreError::Parse { .. } => {
                "Telemetry dataset could not be parsed"
            }
            CoreError::Validation { .. } => "Telemetry dataset contains invalid records",
            CoreError::SourceNotFound(_) | CoreError::Io(_) => {
                "Telemetry dataset could not be read"
            }
            CoreError::Timeout { .. } => "Telemetry dataset load timed out",
            CoreError::Config(_) => "Service configuration is invalid",
            CoreError::Internal(_) => "Internal error",
        }
    }
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::Config(err.to_string())
    }
}
