//! 설정 로드.
//!
//! 우선순위: 기본값 → TOML 설정 파일 → 환경 변수 (`LATMON_WEB__PORT=9000`).
//! CLI 인자 오버라이드는 앱 crate에서 마지막에 적용한다.

use config::{Config, Environment, File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::CoreError;

/// 환경 변수 접두사
pub const ENV_PREFIX: &str = "LATMON";

/// 중첩 키 구분자 (`web.port` → `WEB__PORT`)
const ENV_SEPARATOR: &str = "__";

/// 설정 로더
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// 설정 파일 경로 (선택)
    file: Option<PathBuf>,
    /// 환경 변수 접두사
    env_prefix: String,
}

impl ConfigLoader {
    /// 기본 로더 (파일 없음, `LATMON` 접두사)
    pub fn new() -> Self {
        Self {
            file: None,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// 설정 파일 지정
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// 환경 변수 접두사 변경
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// 설정 파일 경로 반환
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// 상대 경로 해석 기준 디렉토리
    ///
    /// 설정 파일이 있으면 그 디렉토리, 없으면 현재 디렉토리.
    pub fn base_dir(&self) -> PathBuf {
        self.file
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// 설정 로드
    pub fn load(&self) -> Result<AppConfig, CoreError> {
        let mut builder = Config::builder();

        if let Some(path) = &self.file {
            if !path.exists() {
                return Err(CoreError::Config(format!(
                    "설정 파일을 찾을 수 없음: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
            info!("설정 파일 로드: {}", path.display());
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        debug!("설정 로드 완료: {:?}", config);
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
