// ── Snapshot domain types ──
//
// The TrafficSnapshot is the sole artifact crossing into presentation
// consumers. Its shape is identical regardless of which retrieval
// stage produced it; `origin` only labels the provenance.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use strum::{Display, EnumIter};

/// Fixed traffic-source categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
pub enum TrafficCategory {
    #[strum(serialize = "Web Server")]
    #[serde(rename = "Web Server")]
    WebServer,
    #[strum(serialize = "Router")]
    Router,
    #[strum(serialize = "Email Server")]
    #[serde(rename = "Email Server")]
    EmailServer,
    #[strum(serialize = "IoT Devices")]
    #[serde(rename = "IoT Devices")]
    IotDevices,
}

/// Fixed protocol / traffic-type labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
pub enum Protocol {
    #[strum(serialize = "HTTP/HTTPS")]
    #[serde(rename = "HTTP/HTTPS")]
    HttpHttps,
    #[strum(serialize = "DNS")]
    #[serde(rename = "DNS")]
    Dns,
    #[strum(serialize = "SMTP")]
    #[serde(rename = "SMTP")]
    Smtp,
    #[strum(serialize = "SSH")]
    #[serde(rename = "SSH")]
    Ssh,
    Other,
}

/// Which fallback stage supplied the snapshot data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotOrigin {
    /// Primary search query (message content).
    Live,
    /// Secondary inputs query (metadata only, reduced fidelity).
    InputsOnly,
    /// Locally generated sample data.
    Synthetic,
}

/// One bucket of the traffic-over-time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimePoint {
    pub bucket_start: DateTime<Utc>,
    pub total: u64,
    pub blocked: u64,
    pub allowed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Display)]
pub enum EventSeverity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum SecurityStatus {
    Allowed,
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum SystemStatus {
    Completed,
    Failed,
}

/// Display-ready security event row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityEvent {
    pub timestamp: Option<DateTime<Utc>>,
    pub event_type: String,
    pub severity: EventSeverity,
    pub source: String,
    /// Truncated message text (≤100 chars plus ellipsis marker).
    pub description: String,
    pub status: SecurityStatus,
}

/// Display-ready system event row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemEvent {
    pub timestamp: Option<DateTime<Utc>>,
    pub event_type: String,
    pub category: String,
    /// Truncated message text (≤100 chars plus ellipsis marker).
    pub description: String,
    pub status: SystemStatus,
}

/// Complete, immutable output of one pipeline run.
///
/// Invariants (upheld by every producer, live or synthetic):
/// - `traffic_sources` has an entry per category; values sum to 100
///   when any traffic was counted, otherwise all are exactly 0.
/// - `traffic_types` has an entry per protocol.
/// - `time_series` covers the requested window at one-hour cadence,
///   ascending, no duplicate `bucket_start`, zero-filled where empty.
/// - Event lists hold at most 10 rows each, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct TrafficSnapshot {
    /// Category → percentage share of traffic (0–100).
    pub traffic_sources: IndexMap<TrafficCategory, f64>,
    /// Protocol label → record count.
    pub traffic_types: IndexMap<Protocol, u64>,
    pub time_series: Vec<TimePoint>,
    pub security_events: Vec<SecurityEvent>,
    pub system_events: Vec<SystemEvent>,
    pub origin: SnapshotOrigin,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_match_dashboard_text() {
        assert_eq!(TrafficCategory::WebServer.to_string(), "Web Server");
        assert_eq!(TrafficCategory::IotDevices.to_string(), "IoT Devices");
        assert_eq!(Protocol::HttpHttps.to_string(), "HTTP/HTTPS");
        assert_eq!(Protocol::Other.to_string(), "Other");
    }

    #[test]
    fn snapshot_serializes_with_label_keys() {
        let mut traffic_sources = IndexMap::new();
        traffic_sources.insert(TrafficCategory::WebServer, 100.0);
        let snapshot = TrafficSnapshot {
            traffic_sources,
            traffic_types: IndexMap::new(),
            time_series: vec![],
            security_events: vec![],
            system_events: vec![],
            origin: SnapshotOrigin::Live,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["traffic_sources"]["Web Server"], 100.0);
        assert_eq!(json["origin"], "live");
    }
}
