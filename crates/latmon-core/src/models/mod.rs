//! LATMON 도메인 모델.
//!
//! 데이터셋 레코드, 집계 요청/응답 구조체를 정의한다.
//! 모든 모델은 `serde` Serialize/Deserialize를 구현한다.

pub mod report;
pub mod telemetry;
