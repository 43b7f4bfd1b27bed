//! Pipeline stages: normalize → classify → extract → aggregate, plus
//! the staged fetcher and the synthetic generator.

pub mod aggregate;
pub mod classify;
pub mod events;
pub mod fetch;
pub mod normalize;
pub mod synthetic;

use chrono::{DateTime, Utc};

use crate::model::{Record, SnapshotOrigin, TimeRange, TrafficSnapshot};

use self::aggregate::SourceWeighting;

/// Assemble a full snapshot from normalized records.
///
/// Every retrieval branch funnels through here so the snapshot shape
/// is invariant regardless of which stage supplied the data.
pub fn build_snapshot(
    records: &[Record],
    range: TimeRange,
    now: DateTime<Utc>,
    weighting: &SourceWeighting,
    origin: SnapshotOrigin,
) -> TrafficSnapshot {
    let aggregated = aggregate::aggregate(records, range, now, weighting);
    TrafficSnapshot {
        traffic_sources: aggregated.traffic_sources,
        traffic_types: aggregated.traffic_types,
        time_series: aggregated.time_series,
        security_events: events::extract_security(records),
        system_events: events::extract_system(records),
        origin,
    }
}
