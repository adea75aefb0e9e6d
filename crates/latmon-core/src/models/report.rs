//! 집계 결과 모델.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// 리전 단위 요약 통계
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSummary {
    /// 평균 지연 (밀리초)
    pub avg_latency: f64,
    /// 95 백분위 지연 (밀리초, 선형 보간)
    pub p95_latency: f64,
    /// 평균 가용성
    pub avg_uptime: f64,
    /// 임계값을 초과한 레코드 수
    pub breaches: u64,
}

/// 리전 → 요약 매핑
///
/// 요청에 처음 등장한 순서를 유지한다. 같은 리전을 다시 넣으면
/// 기존 위치의 값을 덮어쓴다. JSON 객체로 직렬화된다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionReport {
    entries: Vec<(String, RegionSummary)>,
}

impl RegionReport {
    /// 빈 리포트 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 리전 요약 추가 (이미 있으면 제자리 덮어쓰기)
    pub fn insert(&mut self, region: impl Into<String>, summary: RegionSummary) {
        let region = region.into();
        match self.entries.iter_mut().find(|(name, _)| *name == region) {
            Some((_, existing)) => *existing = summary,
            None => self.entries.push((region, summary)),
        }
    }

    /// 리전 요약 조회
    pub fn get(&self, region: &str) -> Option<&RegionSummary> {
        self.entries
            .iter()
            .find(|(name, _)| name == region)
            .map(|(_, summary)| summary)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 삽입 순서대로 리전 이름 반환
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegionSummary)> {
        self.entries
            .iter()
            .map(|(name, summary)| (name.as_str(), summary))
    }
}

impl Serialize for RegionReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (region, summary) in &self.entries {
            map.serialize_entry(region, summary)?;
        }
        map.end()
    }
}
