//! 데이터셋 경로 해석.
//!
//! # 해석 순서
//! 1. 설정된 절대 경로는 그대로 사용
//! 2. 설정된 상대 경로는 기준 디렉토리(설정 파일 위치 또는 현재 디렉토리) 기준
//! 3. 설정이 없으면 기준 디렉토리의 `q-vercel-latency.json`
//! 4. 그것도 없으면 플랫폼별 데이터 디렉토리
//!    - macOS: `~/Library/Application Support/com.latmon.latmon/`
//!    - Windows: `%APPDATA%\latmon\latmon\data\`
//!    - Linux: `~/.local/share/latmon/`

use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 기본 데이터셋 파일 이름
pub const DEFAULT_DATASET_FILE: &str = "q-vercel-latency.json";

/// 데이터셋 경로 결정
pub fn resolve_dataset_path(configured: Option<&Path>, base_dir: &Path) -> PathBuf {
    let resolved = match configured {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => base_dir.join(path),
        None => {
            let local = base_dir.join(DEFAULT_DATASET_FILE);
            if local.exists() {
                local
            } else {
                ProjectDirs::from("com", "latmon", "latmon")
                    .map(|dirs| dirs.data_dir().join(DEFAULT_DATASET_FILE))
                    .unwrap_or(local)
            }
        }
    };

    debug!("데이터셋 경로 해석: {}", resolved.display());
    resolved
}
