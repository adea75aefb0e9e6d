//! Hexagonal Architecture 포트 인터페이스.
//!
//! 어댑터 crate(`latmon-storage`)가 구현하고, 앱 crate가 DI로 주입한다.

pub mod telemetry_source;
