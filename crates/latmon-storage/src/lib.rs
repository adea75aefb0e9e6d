//! # latmon-storage
//!
//! 텔레메트리 데이터 소스 어댑터.
//! `TelemetrySource` 포트를 구현하고 데이터셋 경로를 해석한다.
//!
//! ## 모듈
//! - `json_file`: JSON 배열 파일 소스
//! - `memory`: 인메모리 소스 (테스트/픽스처)
//! - `path`: 데이터셋 경로 해석

pub mod json_file;
pub mod memory;
pub mod path;

pub use json_file::JsonFileSource;
pub use memory::InMemorySource;
