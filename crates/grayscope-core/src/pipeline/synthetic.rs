// Synthetic snapshot generation.
//
// Used when live retrieval fails entirely, and standalone for demos.
// Values are randomized but bounded to plausible magnitudes, and the
// output satisfies every snapshot invariant so downstream consumers
// cannot distinguish it schema-wise from live data.

use chrono::{DateTime, Duration, DurationRound, Utc};
use indexmap::IndexMap;
use rand::Rng;
use strum::IntoEnumIterator;

use crate::model::{
    EventSeverity, Protocol, SecurityEvent, SecurityStatus, SnapshotOrigin, SystemEvent,
    SystemStatus, TimePoint, TimeRange, TrafficCategory, TrafficSnapshot,
};

/// Generate a schema-identical sample snapshot for the given window.
pub fn generate(range: TimeRange, now: DateTime<Utc>) -> TrafficSnapshot {
    let mut rng = rand::rng();

    // Random category weights normalized to percentages summing to 100.
    let raw_weights: Vec<(TrafficCategory, f64)> = TrafficCategory::iter()
        .map(|c| (c, rng.random_range(5.0..=100.0)))
        .collect();
    let total: f64 = raw_weights.iter().map(|(_, w)| w).sum();
    let traffic_sources: IndexMap<TrafficCategory, f64> = raw_weights
        .into_iter()
        .map(|(c, w)| (c, w / total * 100.0))
        .collect();

    let traffic_types: IndexMap<Protocol, u64> = Protocol::iter()
        .map(|p| {
            let count = match p {
                Protocol::HttpHttps => rng.random_range(2000..=5000),
                Protocol::Dns => rng.random_range(800..=2500),
                Protocol::Smtp => rng.random_range(1000..=3000),
                Protocol::Ssh => rng.random_range(200..=1000),
                Protocol::Other => rng.random_range(100..=800),
            };
            (p, count)
        })
        .collect();

    let hours = i64::try_from(range.hours()).unwrap_or(i64::MAX);
    let window_start =
        now.duration_trunc(Duration::hours(1)).unwrap_or(now) - Duration::hours(hours - 1);
    let time_series: Vec<TimePoint> = (0..hours)
        .map(|i| {
            let total = rng.random_range(8000..=14000);
            let blocked = rng.random_range(0..=200);
            TimePoint {
                bucket_start: window_start + Duration::hours(i),
                total,
                blocked,
                allowed: total - blocked,
            }
        })
        .collect();

    TrafficSnapshot {
        traffic_sources,
        traffic_types,
        time_series,
        security_events: sample_security_events(&mut rng, now),
        system_events: sample_system_events(&mut rng, now),
        origin: SnapshotOrigin::Synthetic,
    }
}

fn sample_ip(rng: &mut impl Rng) -> String {
    format!("192.168.1.{}", rng.random_range(2..=254))
}

fn sample_security_events(rng: &mut impl Rng, now: DateTime<Utc>) -> Vec<SecurityEvent> {
    let templates = [
        (
            "Unauthorized Access",
            EventSeverity::High,
            SecurityStatus::Allowed,
            "Unauthorized login attempt",
        ),
        (
            "Port Scan",
            EventSeverity::Medium,
            SecurityStatus::Blocked,
            "Sequential connection attempts blocked",
        ),
        (
            "Access Denied",
            EventSeverity::Medium,
            SecurityStatus::Blocked,
            "Policy denied outbound connection",
        ),
        (
            "Failed Operation",
            EventSeverity::Low,
            SecurityStatus::Allowed,
            "Authentication failed, retry allowed",
        ),
    ];

    templates
        .iter()
        .enumerate()
        .map(|(i, (event_type, severity, status, description))| SecurityEvent {
            timestamp: Some(now - Duration::minutes(i64::try_from(i).unwrap_or(0) * 7 + 1)),
            event_type: (*event_type).to_owned(),
            severity: *severity,
            source: sample_ip(rng),
            description: (*description).to_owned(),
            status: *status,
        })
        .collect()
}

fn sample_system_events(rng: &mut impl Rng, now: DateTime<Utc>) -> Vec<SystemEvent> {
    let templates = [
        ("Service Restart", SystemStatus::Completed, "Service restarted after update"),
        ("Resource Alert", SystemStatus::Completed, "Memory usage warning cleared"),
        ("System Error", SystemStatus::Failed, "Error writing to journal"),
    ];

    templates
        .iter()
        .enumerate()
        .map(|(i, (event_type, status, description))| SystemEvent {
            timestamp: Some(now - Duration::minutes(i64::try_from(i).unwrap_or(0) * 11 + 3)),
            event_type: (*event_type).to_owned(),
            category: "System".into(),
            description: format!("{description} on {}", sample_ip(rng)),
            status: *status,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 12, 30, 0).unwrap()
    }

    #[test]
    fn synthetic_snapshot_upholds_percentage_invariant() {
        let snapshot = generate(TimeRange::Last24Hours, now());

        assert_eq!(snapshot.traffic_sources.len(), 4);
        let sum: f64 = snapshot.traffic_sources.values().sum();
        assert!((sum - 100.0).abs() < 1e-9, "sum was {sum}");
    }

    #[test]
    fn synthetic_series_matches_window_cadence() {
        let snapshot = generate(TimeRange::Last7Days, now());

        assert_eq!(snapshot.time_series.len(), 168);
        for pair in snapshot.time_series.windows(2) {
            assert_eq!(
                pair[1].bucket_start - pair[0].bucket_start,
                Duration::hours(1)
            );
        }
        for point in &snapshot.time_series {
            assert_eq!(point.total, point.blocked + point.allowed);
        }
    }

    #[test]
    fn synthetic_events_are_capped_and_newest_first() {
        let snapshot = generate(TimeRange::LastHour, now());

        assert!(snapshot.security_events.len() <= 10);
        assert!(snapshot.system_events.len() <= 10);
        for pair in snapshot.security_events.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
        assert_eq!(snapshot.origin, SnapshotOrigin::Synthetic);
    }

    #[test]
    fn protocol_counts_stay_in_plausible_magnitudes() {
        let snapshot = generate(TimeRange::Last6Hours, now());

        assert_eq!(snapshot.traffic_types.len(), 5);
        for count in snapshot.traffic_types.values() {
            assert!(*count >= 100 && *count <= 5000);
        }
    }
}
