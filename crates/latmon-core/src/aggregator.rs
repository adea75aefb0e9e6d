//! 리전별 지연/가용성 집계.
//!
//! 저장소는 읽기만 하며 I/O나 대기 지점이 없다. 리전끼리는 서로
//! 영향을 주지 않고, 일치하는 레코드가 없는 리전은 결과에서 빠진다.

use crate::models::report::{RegionReport, RegionSummary};
use crate::models::telemetry::TelemetryRecord;
use crate::store::TelemetryStore;

/// 지연 백분위 (p95)
pub const LATENCY_PERCENTILE: f64 = 95.0;

/// 요청된 리전 순서대로 요약 통계 계산
pub fn aggregate<S: AsRef<str>>(
    store: &TelemetryStore,
    regions: &[S],
    threshold_ms: i64,
) -> RegionReport {
    let mut report = RegionReport::new();

    for region in regions {
        let region = region.as_ref();
        let records: Vec<&TelemetryRecord> = store.records_for(region).collect();
        if let Some(summary) = summarize(&records, threshold_ms) {
            report.insert(region, summary);
        }
    }

    report
}

/// 레코드 묶음 요약. 비어 있으면 `None`.
pub fn summarize(records: &[&TelemetryRecord], threshold_ms: i64) -> Option<RegionSummary> {
    if records.is_empty() {
        return None;
    }

    let mut latencies: Vec<f64> = records.iter().map(|r| r.latency_ms).collect();
    let uptimes: Vec<f64> = records.iter().map(|r| r.uptime).collect();

    let threshold = threshold_ms as f64;
    let breaches = latencies.iter().filter(|&&l| l > threshold).count() as u64;

    let avg_latency = mean(&latencies)?;
    let avg_uptime = mean(&uptimes)?;

    latencies.sort_by(|a, b| a.total_cmp(b));
    let p95_latency = percentile(&latencies, LATENCY_PERCENTILE)?;

    Some(RegionSummary {
        avg_latency,
        p95_latency,
        avg_uptime,
        breaches,
    })
}

/// 산술 평균. 빈 슬라이스면 `None`.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// 정렬된 값의 백분위 (최근접 순위 간 선형 보간)
///
/// 위치는 `q / 100 * (n - 1)`이며, 양쪽 순위 통계량 사이를 보간한다.
/// `q`는 `[0, 100]`으로 잘린다. 빈 슬라이스면 `None`.
pub fn percentile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = (q.clamp(0.0, 100.0) / 100.0) * last as f64;

    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(last);
    let weight = rank - lower as f64;

    Some(lerp(sorted[lower], sorted[upper], weight))
}

/// `t >= 0.5`이면 `b` 쪽에서 계산한다 (`t == 1`에서 정확히 `b`)
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(records: Vec<TelemetryRecord>) -> TelemetryStore {
        TelemetryStore::from_records(records, "test").unwrap()
    }

    fn us_east() -> TelemetryStore {
        store(vec![
            TelemetryRecord::new("us-east", 100.0, 99.9),
            TelemetryRecord::new("us-east", 200.0, 99.8),
            TelemetryRecord::new("us-east", 300.0, 99.7),
        ])
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn reference_example() {
        let report = aggregate(&us_east(), &["us-east"], 150);
        let summary = report.get("us-east").unwrap();

        assert_eq!(summary.avg_latency, 200.0);
        assert_eq!(summary.breaches, 2);
        assert!(approx_eq(summary.avg_uptime, 99.8));
        assert!(approx_eq(summary.p95_latency, 290.0));
    }

    #[test]
    fn breach_is_strictly_greater() {
        let report = aggregate(&us_east(), &["us-east"], 200);
        assert_eq!(report.get("us-east").unwrap().breaches, 1);

        let report = aggregate(&us_east(), &["us-east"], 300);
        assert_eq!(report.get("us-east").unwrap().breaches, 0);

        let report = aggregate(&us_east(), &["us-east"], -1);
        assert_eq!(report.get("us-east").unwrap().breaches, 3);
    }

    #[test]
    fn single_record_p95_is_that_value() {
        let s = store(vec![TelemetryRecord::new("apac", 187.3, 98.2)]);
        let summary = aggregate(&s, &["apac"], 0).get("apac").cloned().unwrap();

        assert_eq!(summary.p95_latency, 187.3);
        assert_eq!(summary.avg_latency, 187.3);
        assert_eq!(summary.avg_uptime, 98.2);
    }

    #[test]
    fn unmatched_region_is_omitted() {
        let report = aggregate(&us_east(), &["us-east", "eu-west", "US-EAST"], 150);
        assert_eq!(report.regions().collect::<Vec<_>>(), vec!["us-east"]);
    }

    #[test]
    fn empty_request_yields_empty_report() {
        let regions: &[String] = &[];
        assert!(aggregate(&us_east(), regions, 150).is_empty());
    }

    #[test]
    fn duplicate_regions_produce_one_entry() {
        let once = aggregate(&us_east(), &["us-east"], 150);
        let twice = aggregate(&us_east(), &["us-east", "us-east"], 150);
        assert_eq!(once, twice);
    }

    #[test]
    fn regions_are_independent_and_ordered() {
        let s = store(vec![
            TelemetryRecord::new("emea", 10.0, 90.0),
            TelemetryRecord::new("apac", 1000.0, 50.0),
            TelemetryRecord::new("emea", 30.0, 100.0),
        ]);
        let report = aggregate(&s, &["apac", "emea"], 20);

        assert_eq!(report.regions().collect::<Vec<_>>(), vec!["apac", "emea"]);
        let emea = report.get("emea").unwrap();
        assert_eq!(emea.avg_latency, 20.0);
        assert_eq!(emea.avg_uptime, 95.0);
        assert_eq!(emea.breaches, 1);
        assert_eq!(report.get("apac").unwrap().breaches, 1);
    }

    #[test]
    fn p95_ignores_input_order() {
        let shuffled = store(vec![
            TelemetryRecord::new("us-east", 300.0, 99.7),
            TelemetryRecord::new("us-east", 100.0, 99.9),
            TelemetryRecord::new("us-east", 200.0, 99.8),
        ]);
        let a = aggregate(&shuffled, &["us-east"], 0);
        let b = aggregate(&us_east(), &["us-east"], 0);
        assert_eq!(a.get("us-east").unwrap().p95_latency, b.get("us-east").unwrap().p95_latency);
    }

    #[test]
    fn p95_is_monotonic_in_latencies() {
        let base = [120.0, 135.5, 150.0, 180.25, 210.0, 240.0, 199.9];
        let mut previous = f64::NEG_INFINITY;

        for bump in 0..20 {
            let mut values: Vec<f64> = base.iter().map(|v| v + bump as f64 * 7.5).collect();
            values.sort_by(|a, b| a.total_cmp(b));
            let p95 = percentile(&values, 95.0).unwrap();
            assert!(p95 >= previous);
            previous = p95;
        }
    }

    #[test]
    fn percentile_interpolates_between_ranks() {
        let values = [1.0, 2.0, 3.0, 4.0];
        // 위치 0.95 * 3 = 2.85
        assert!(approx_eq(percentile(&values, 95.0).unwrap(), 3.85));
        assert_eq!(percentile(&values, 0.0), Some(1.0));
        assert_eq!(percentile(&values, 100.0), Some(4.0));
        assert!(approx_eq(percentile(&values, 50.0).unwrap(), 2.5));
        assert_eq!(percentile(&[], 95.0), None);
    }

    #[test]
    fn p95_stays_within_sample_range() {
        let values = [5.0, 5.0, 5.0, 5.0, 5.0];
        assert_eq!(percentile(&values, 95.0), Some(5.0));

        let values = [0.0, 1e9];
        let p = percentile(&values, 95.0).unwrap();
        assert!((0.0..=1e9).contains(&p));
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
    }

    #[test]
    fn summarize_empty_is_none() {
        assert!(summarize(&[], 100).is_none());
    }
}
