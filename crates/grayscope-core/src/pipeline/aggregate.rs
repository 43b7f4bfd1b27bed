// Tallies and time bucketing.
//
// Category shares and protocol counts come straight from the
// classifier; the time series is a fixed one-hour grid spanning the
// requested window, zero-filled so the cadence is uniform regardless
// of record sparsity.

use chrono::{DateTime, Duration, DurationRound, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::IntoEnumIterator;

use crate::model::{Protocol, Record, TimePoint, TimeRange, TrafficCategory};
use crate::pipeline::{classify, events};

/// Weighting used to convert per-category tallies into percentages.
///
/// Message count is the default; volume weighting sums a numeric field
/// per record instead (records without the field contribute 0).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceWeighting {
    #[default]
    MessageCount,
    VolumeField(String),
}

/// Output of one aggregation pass.
#[derive(Debug, Clone)]
pub struct Aggregated {
    pub traffic_sources: IndexMap<TrafficCategory, f64>,
    pub traffic_types: IndexMap<Protocol, u64>,
    pub time_series: Vec<TimePoint>,
}

/// Aggregate normalized records over the requested window.
///
/// `now` anchors the window: buckets run at one-hour cadence ending at
/// the hour containing `now`, so a 7d request always yields 168
/// buckets. Records without a timestamp count toward the tallies but
/// not the series.
pub fn aggregate(
    records: &[Record],
    range: TimeRange,
    now: DateTime<Utc>,
    weighting: &SourceWeighting,
) -> Aggregated {
    Aggregated {
        traffic_sources: source_percentages(records, weighting),
        traffic_types: protocol_counts(records),
        time_series: bucketize(records, range, now),
    }
}

/// Per-category percentage of total weight. All zeros when nothing was
/// counted — never a division by zero.
fn source_percentages(
    records: &[Record],
    weighting: &SourceWeighting,
) -> IndexMap<TrafficCategory, f64> {
    let mut weights: IndexMap<TrafficCategory, f64> =
        TrafficCategory::iter().map(|c| (c, 0.0)).collect();

    for record in records {
        let weight = match weighting {
            SourceWeighting::MessageCount => 1.0,
            SourceWeighting::VolumeField(field) => record
                .fields
                .get(field)
                .and_then(Value::as_f64)
                .unwrap_or(0.0),
        };
        if let Some(entry) = weights.get_mut(&classify::classify_source(record)) {
            *entry += weight;
        }
    }

    let total: f64 = weights.values().sum();
    if total > 0.0 {
        for value in weights.values_mut() {
            *value = *value / total * 100.0;
        }
    }
    weights
}

fn protocol_counts(records: &[Record]) -> IndexMap<Protocol, u64> {
    let mut counts: IndexMap<Protocol, u64> = Protocol::iter().map(|p| (p, 0)).collect();
    for record in records {
        if let Some(entry) = counts.get_mut(&classify::classify_protocol(record)) {
            *entry += 1;
        }
    }
    counts
}

/// Zero-filled one-hour buckets spanning the window. A record matching
/// the security rule contributes to `blocked`, otherwise `allowed`.
fn bucketize(records: &[Record], range: TimeRange, now: DateTime<Utc>) -> Vec<TimePoint> {
    let hours = i64::try_from(range.hours()).unwrap_or(i64::MAX);
    let window_start =
        now.duration_trunc(Duration::hours(1)).unwrap_or(now) - Duration::hours(hours - 1);

    let mut series: Vec<TimePoint> = (0..hours)
        .map(|i| TimePoint {
            bucket_start: window_start + Duration::hours(i),
            total: 0,
            blocked: 0,
            allowed: 0,
        })
        .collect();

    for record in records {
        let Some(ts) = record.timestamp else { continue };
        if ts < window_start {
            continue;
        }
        let offset = ts.signed_duration_since(window_start).num_hours();
        let Some(point) = usize::try_from(offset)
            .ok()
            .and_then(|idx| series.get_mut(idx))
        else {
            continue;
        };
        point.total += 1;
        if events::is_security(record) {
            point.blocked += 1;
        } else {
            point.allowed += 1;
        }
    }

    series
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use serde_json::{Map, json};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 12, 30, 0).unwrap()
    }

    fn record(source: &str, text: &str, timestamp: Option<DateTime<Utc>>) -> Record {
        Record {
            timestamp,
            source: source.into(),
            text: text.into(),
            fields: Map::new(),
        }
    }

    fn hours_ago(h: i64) -> Option<DateTime<Utc>> {
        Some(now() - Duration::hours(h))
    }

    #[test]
    fn percentages_sum_to_100_when_records_exist() {
        let records = vec![
            record("web-01", "https request", hours_ago(1)),
            record("web-02", "http request", hours_ago(2)),
            record("router", "dns query", hours_ago(3)),
        ];

        let agg = aggregate(&records, TimeRange::Last24Hours, now(), &SourceWeighting::MessageCount);

        let sum: f64 = agg.traffic_sources.values().sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert!((agg.traffic_sources[&TrafficCategory::WebServer] - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_input_reports_all_zero_percentages() {
        let agg = aggregate(&[], TimeRange::Last24Hours, now(), &SourceWeighting::MessageCount);

        assert_eq!(agg.traffic_sources.len(), 4);
        assert!(agg.traffic_sources.values().all(|v| *v == 0.0));
        assert_eq!(agg.traffic_types.len(), 5);
        assert!(agg.traffic_types.values().all(|v| *v == 0));
    }

    #[test]
    fn volume_weighting_reads_the_named_field() {
        let mut heavy = record("web-01", "https", hours_ago(1));
        heavy.fields = json!({ "traffic_volume": 300 })
            .as_object()
            .unwrap()
            .clone();
        let mut light = record("router", "dns", hours_ago(1));
        light.fields = json!({ "traffic_volume": 100 })
            .as_object()
            .unwrap()
            .clone();

        let agg = aggregate(
            &[heavy, light],
            TimeRange::Last24Hours,
            now(),
            &SourceWeighting::VolumeField("traffic_volume".into()),
        );

        assert!((agg.traffic_sources[&TrafficCategory::WebServer] - 75.0).abs() < 1e-9);
        assert!((agg.traffic_sources[&TrafficCategory::Router] - 25.0).abs() < 1e-9);
    }

    #[test]
    fn series_spans_full_window_with_no_gaps() {
        let agg = aggregate(&[], TimeRange::Last7Days, now(), &SourceWeighting::MessageCount);

        assert_eq!(agg.time_series.len(), 168);
        for pair in agg.time_series.windows(2) {
            assert_eq!(
                pair[1].bucket_start - pair[0].bucket_start,
                Duration::hours(1)
            );
        }
        assert!(agg.time_series.iter().all(|p| p.total == 0));
        // Last bucket contains `now`.
        assert_eq!(
            agg.time_series.last().unwrap().bucket_start,
            Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn security_records_count_as_blocked() {
        let records = vec![
            record("fw", "connection blocked", hours_ago(0)),
            record("web", "https ok", hours_ago(0)),
            record("web", "https ok", hours_ago(0)),
        ];

        let agg = aggregate(&records, TimeRange::LastHour, now(), &SourceWeighting::MessageCount);

        assert_eq!(agg.time_series.len(), 1);
        let point = &agg.time_series[0];
        assert_eq!(point.total, 3);
        assert_eq!(point.blocked, 1);
        assert_eq!(point.allowed, 2);
    }

    #[test]
    fn records_outside_the_window_are_ignored_in_series() {
        let records = vec![
            record("web", "https", hours_ago(30)),
            record("web", "https", Some(now() + Duration::hours(2))),
            record("web", "https", None),
        ];

        let agg = aggregate(&records, TimeRange::Last24Hours, now(), &SourceWeighting::MessageCount);

        assert!(agg.time_series.iter().all(|p| p.total == 0));
        // ...but they still count toward the tallies (except nothing
        // drops from tallies at all: all three are web records).
        assert!((agg.traffic_sources[&TrafficCategory::WebServer] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn bucket_assignment_lands_in_the_right_hour() {
        let records = vec![record("web", "https", hours_ago(5))];

        let agg = aggregate(&records, TimeRange::Last24Hours, now(), &SourceWeighting::MessageCount);

        let hit: Vec<_> = agg.time_series.iter().filter(|p| p.total > 0).collect();
        assert_eq!(hit.len(), 1);
        assert_eq!(
            hit[0].bucket_start,
            Utc.with_ymd_and_hms(2025, 1, 10, 7, 0, 0).unwrap()
        );
    }
}
