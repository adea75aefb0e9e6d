//! # latmon-app
//!
//! LATMON 서버 바이너리 진입점.
//! 설정 로드, 데이터셋 1회 로드, 웹 서버 라이프사이클 관리.

mod lifecycle;

use anyhow::{Context, Result};
use clap::Parser;
use latmon_core::config::AppConfig;
use latmon_core::config_loader::ConfigLoader;
use latmon_core::store::DatasetState;
use latmon_storage::path::resolve_dataset_path;
use latmon_storage::JsonFileSource;
use latmon_web::WebServer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::lifecycle::LifecycleManager;

/// LATMON 리전 지연 집계 서버
///
/// 사전 기록된 텔레메트리를 리전별로 집계하는 HTTP 서비스
#[derive(Parser, Debug)]
#[command(name = "latmon")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 설정 파일 경로 (TOML)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 데이터셋 파일 경로 (설정 파일보다 우선, 현재 디렉토리 기준)
    #[arg(long, short = 'd')]
    dataset: Option<PathBuf>,

    /// 서버 포트 (설정 파일보다 우선)
    #[arg(long, short = 'p')]
    port: Option<u16>,

    /// 외부 접근 허용 (0.0.0.0 바인드)
    #[arg(long)]
    allow_external: bool,

    /// 응답 매핑을 "regions" 키로 감싸기
    #[arg(long)]
    wrap_regions: bool,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,
}

/// tracing 초기화 (`RUST_LOG`가 있으면 우선)
fn init_tracing(log_level: &str) {
    let log_filter = format!(
        "latmon={0},latmon_app={0},latmon_core={0},latmon_storage={0},latmon_web={0},tower_http={0}",
        log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();
}

/// CLI 인자로 설정 오버라이드
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(port) = args.port {
        config.web.port = port;
    }
    if args.allow_external {
        config.web.allow_external = true;
    }
    if args.wrap_regions {
        config.response.wrap_regions = true;
    }
}

/// 설정 로드 및 데이터셋 경로 확정
///
/// CLI `--dataset`은 현재 디렉토리, 설정 파일의 경로는 설정 파일 디렉토리 기준.
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_file(path);
    }

    let mut config = loader.load().context("설정 로드 실패")?;
    apply_overrides(&mut config, args);

    let dataset_path = match &args.dataset {
        Some(path) => resolve_dataset_path(Some(path), Path::new(".")),
        None => resolve_dataset_path(config.dataset.path.as_deref(), &loader.base_dir()),
    };
    config.dataset.path = Some(dataset_path);

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    info!("LATMON 서버 시작 (v{})", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args)?;

    // ── 데이터셋 1회 로드 (실패는 캐시, 서버는 계속 기동) ──
    let dataset_path = config
        .dataset
        .path
        .clone()
        .context("데이터셋 경로가 확정되지 않음")?;
    info!("데이터셋: {}", dataset_path.display());

    let source = JsonFileSource::new(dataset_path);
    let dataset = DatasetState::initialize(&source, config.load_timeout()).await;

    // ── 웹 서버 ──
    let server = WebServer::new(dataset, config.web.clone())
        .with_response_config(config.response.clone());
    info!("서버 URL: {}", server.url());

    let lifecycle = Arc::new(LifecycleManager::new());
    let signal_lifecycle = lifecycle.clone();
    tokio::spawn(async move {
        if let Err(e) = signal_lifecycle.wait_for_signal().await {
            error!("시그널 핸들러 등록 실패: {}", e);
        }
    });

    server
        .run(lifecycle.subscribe())
        .await
        .context("웹 서버 실행 실패")?;

    info!("LATMON 서버 종료");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Args {
        Args::parse_from(std::iter::once("latmon").chain(args.iter().copied()))
    }

    #[test]
    fn cli_defaults() {
        let args = parse(&[]);
        assert_eq!(args.log_level, "info");
        assert!(args.config.is_none());
        assert!(args.dataset.is_none());
        assert!(args.port.is_none());
        assert!(!args.wrap_regions);
    }

    #[test]
    fn cli_overrides_config() {
        let args = parse(&["--port", "9100", "--wrap-regions", "--allow-external"]);
        let mut config = AppConfig::default();
        apply_overrides(&mut config, &args);

        assert_eq!(config.web.port, 9100);
        assert!(config.web.allow_external);
        assert!(config.response.wrap_regions);
    }

    #[test]
    fn dataset_relative_to_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("latmon.toml");
        fs::write(&config_path, "[dataset]\npath = \"telemetry.json\"\n").unwrap();

        let args = parse(&["-c", config_path.to_str().unwrap()]);
        let config = load_config(&args).unwrap();

        assert_eq!(
            config.dataset.path,
            Some(temp_dir.path().join("telemetry.json"))
        );
    }

    #[test]
    fn cli_dataset_wins_over_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("latmon.toml");
        fs::write(&config_path, "[dataset]\npath = \"telemetry.json\"\n").unwrap();

        let args = parse(&[
            "-c",
            config_path.to_str().unwrap(),
            "-d",
            "/srv/data/latency.json",
        ]);
        let config = load_config(&args).unwrap();

        assert_eq!(
            config.dataset.path,
            Some(PathBuf::from("/srv/data/latency.json"))
        );
    }

    #[test]
    fn missing_config_file_fails() {
        let args = parse(&["-c", "/nonexistent/latmon.toml"]);
        assert!(load_config(&args).is_err());
    }
}
