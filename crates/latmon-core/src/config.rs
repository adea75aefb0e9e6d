//! 애플리케이션 설정 구조체.
//!
//! 웹 서버 포트, 데이터셋 경로, 응답 형태 등 런타임 설정을 정의한다.
//! `config` crate를 통해 파일/환경변수에서 로드 ([`crate::config_loader`]).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 웹 서버 설정
    #[serde(default)]
    pub web: WebConfig,
    /// 데이터셋 설정
    #[serde(default)]
    pub dataset: DatasetConfig,
    /// 응답 형태 설정
    #[serde(default)]
    pub response: ResponseConfig,
}

// ============================================================
// 웹 서버 설정
// ============================================================

/// 웹 서버 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebConfig {
    /// 웹 서버 포트 (기본: 8000)
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// 외부 접근 허용 여부 (false: 127.0.0.1 only)
    #[serde(default)]
    pub allow_external: bool,
    /// 포트 사용 중일 때 시도할 최대 포트 수
    #[serde(default = "default_max_port_attempts")]
    pub max_port_attempts: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: default_web_port(),
            allow_external: false,
            max_port_attempts: default_max_port_attempts(),
        }
    }
}

// ============================================================
// 데이터셋 설정
// ============================================================

/// 데이터셋 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// 데이터셋 파일 경로 (None: 기본 경로 탐색)
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// 시작 시 로드 타임아웃 (밀리초)
    #[serde(default = "default_load_timeout_ms")]
    pub load_timeout_ms: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: None,
            load_timeout_ms: default_load_timeout_ms(),
        }
    }
}

// ============================================================
// 응답 형태 설정
// ============================================================

/// 응답 형태 설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseConfig {
    /// 결과 매핑을 최상위 `"regions"` 키로 감쌀지 여부
    #[serde(default)]
    pub wrap_regions: bool,
}

// ============================================================
// AppConfig impl
// ============================================================

impl AppConfig {
    /// 데이터셋 로드 타임아웃을 Duration으로 반환
    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.dataset.load_timeout_ms)
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_web_port() -> u16 {
    8000
}
fn default_max_port_attempts() -> u16 {
    10
}
fn default_load_timeout_ms() -> u64 {
    5_000
}
