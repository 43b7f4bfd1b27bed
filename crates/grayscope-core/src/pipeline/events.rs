// Security and system event extraction.
//
// A record qualifies as a security event if any security keyword
// appears in its haystack, and as a system event via the system set;
// the two matches are independent, so one record may appear in both
// lists. Rows are ordered newest first (ties keep input order) and
// capped at 10 — records beyond the cap are dropped, not queued.

use crate::model::{
    EventSeverity, Record, SecurityEvent, SecurityStatus, SystemEvent, SystemStatus,
};

pub const SECURITY_KEYWORDS: &[&str] = &["unauthorized", "blocked", "denied", "failed"];
pub const SYSTEM_KEYWORDS: &[&str] = &["service", "restart", "error", "warning"];

const MAX_EVENTS: usize = 10;
const MAX_DESCRIPTION_CHARS: usize = 100;

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| haystack.contains(kw))
}

/// Whether a record matches the security rule. The aggregator also
/// uses this to route bucket counts into `blocked`.
pub fn is_security(record: &Record) -> bool {
    contains_any(&record.haystack(), SECURITY_KEYWORDS)
}

/// Whether a record matches the system rule.
pub fn is_system(record: &Record) -> bool {
    contains_any(&record.haystack(), SYSTEM_KEYWORDS)
}

/// Newest-first, capped list of security event rows.
pub fn extract_security(records: &[Record]) -> Vec<SecurityEvent> {
    newest_first(records, is_security)
        .into_iter()
        .take(MAX_EVENTS)
        .map(security_row)
        .collect()
}

/// Newest-first, capped list of system event rows.
pub fn extract_system(records: &[Record]) -> Vec<SystemEvent> {
    newest_first(records, is_system)
        .into_iter()
        .take(MAX_EVENTS)
        .map(system_row)
        .collect()
}

/// Filter matching records and sort newest timestamp first. The sort
/// is stable, so ties (and timestamp-less records, which sort last)
/// keep their input order.
fn newest_first(records: &[Record], matches: impl Fn(&Record) -> bool) -> Vec<&Record> {
    let mut hits: Vec<&Record> = records.iter().filter(|r| matches(r)).collect();
    hits.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    hits
}

fn security_row(record: &Record) -> SecurityEvent {
    let hay = record.haystack();

    let (event_type, severity) = if hay.contains("unauthorized") {
        ("Unauthorized Access", EventSeverity::High)
    } else if hay.contains("denied") {
        ("Access Denied", EventSeverity::Medium)
    } else if hay.contains("blocked") {
        ("Blocked Traffic", EventSeverity::Medium)
    } else {
        ("Failed Operation", EventSeverity::Low)
    };

    let status = if hay.contains("blocked") || hay.contains("denied") {
        SecurityStatus::Blocked
    } else {
        SecurityStatus::Allowed
    };

    SecurityEvent {
        timestamp: record.timestamp,
        event_type: event_type.into(),
        severity,
        source: record.source.clone(),
        description: truncate(&record.text),
        status,
    }
}

fn system_row(record: &Record) -> SystemEvent {
    let hay = record.haystack();

    let event_type = if hay.contains("restart") {
        "Service Restart"
    } else if hay.contains("service") {
        "Service Event"
    } else if hay.contains("error") {
        "System Error"
    } else {
        "System Warning"
    };

    let status = if hay.contains("error") || hay.contains("failed") {
        SystemStatus::Failed
    } else {
        SystemStatus::Completed
    };

    SystemEvent {
        timestamp: record.timestamp,
        event_type: event_type.into(),
        category: "System".into(),
        description: truncate(&record.text),
        status,
    }
}

/// Clip display text to `MAX_DESCRIPTION_CHARS`, appending an ellipsis
/// marker when anything was cut.
fn truncate(text: &str) -> String {
    let mut chars = text.char_indices();
    match chars.nth(MAX_DESCRIPTION_CHARS) {
        None => text.to_owned(),
        Some((idx, _)) => {
            let mut out = text[..idx].to_owned();
            out.push('…');
            out
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::Map;

    use super::*;

    fn record(source: &str, text: &str, hour: Option<u32>) -> Record {
        Record {
            timestamp: hour.map(|h| Utc.with_ymd_and_hms(2025, 1, 1, h, 0, 0).unwrap()),
            source: source.into(),
            text: text.into(),
            fields: Map::new(),
        }
    }

    #[test]
    fn unauthorized_record_becomes_high_severity_event() {
        let records = vec![record(
            "unknown",
            "Unauthorized access from 10.0.0.5",
            Some(3),
        )];

        let events = extract_security(&records);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "Unauthorized Access");
        assert_eq!(events[0].severity, EventSeverity::High);
        assert_eq!(events[0].status, SecurityStatus::Allowed);
    }

    #[test]
    fn blocked_record_gets_blocked_status() {
        let records = vec![record("fw-01", "Connection blocked by policy", Some(1))];

        let events = extract_security(&records);
        assert_eq!(events[0].status, SecurityStatus::Blocked);
        assert_eq!(events[0].severity, EventSeverity::Medium);
    }

    #[test]
    fn one_record_can_hit_both_lists() {
        let records = vec![record("app-01", "service restart failed", Some(2))];

        assert_eq!(extract_security(&records).len(), 1);
        let system = extract_system(&records);
        assert_eq!(system.len(), 1);
        assert_eq!(system[0].event_type, "Service Restart");
        assert_eq!(system[0].status, SystemStatus::Failed);
    }

    #[test]
    fn results_are_newest_first_and_capped_at_ten() {
        let records: Vec<Record> = (0..15)
            .map(|i| record("fw", "access denied", Some(i)))
            .collect();

        let events = extract_security(&records);
        assert_eq!(events.len(), 10);
        let hours: Vec<_> = events
            .iter()
            .map(|e| e.timestamp.unwrap().format("%H").to_string())
            .collect();
        assert_eq!(hours[0], "14");
        assert_eq!(hours[9], "05");
    }

    #[test]
    fn ties_keep_input_order_and_missing_timestamps_sort_last() {
        let records = vec![
            record("a", "warning: disk", Some(5)),
            record("b", "warning: cpu", Some(5)),
            record("c", "warning: mem", None),
        ];

        let events = extract_system(&records);
        let sources: Vec<_> = events.iter().map(|e| e.description.clone()).collect();
        assert_eq!(
            sources,
            vec!["warning: disk", "warning: cpu", "warning: mem"]
        );
    }

    #[test]
    fn long_descriptions_are_truncated_with_marker() {
        let long = "error ".repeat(40);
        let records = vec![record("app", &long, Some(1))];

        let events = extract_system(&records);
        assert_eq!(events[0].description.chars().count(), 101);
        assert!(events[0].description.ends_with('…'));
    }

    #[test]
    fn short_descriptions_pass_through() {
        let records = vec![record("app", "error: boom", Some(1))];
        assert_eq!(extract_system(&records)[0].description, "error: boom");
    }

    #[test]
    fn non_matching_records_are_ignored() {
        let records = vec![record("web", "GET / 200 OK", Some(1))];
        assert!(extract_security(&records).is_empty());
        assert!(extract_system(&records).is_empty());
    }
}
