// Keyword classification of records.
//
// Policy is a priority-ordered rule table: (keywords, label) pairs
// evaluated top to bottom over the record's lowercased source + text,
// first match wins, with an explicit default for non-matching records.
// Both functions are total and deterministic; accuracy is bounded by
// keyword overlap in the source data.

use crate::model::{Protocol, Record, TrafficCategory};

/// Ordered category rules. First match wins.
const CATEGORY_RULES: &[(&[&str], TrafficCategory)] = &[
    (&["web", "http"], TrafficCategory::WebServer),
    (&["router"], TrafficCategory::Router),
    (&["email", "smtp"], TrafficCategory::EmailServer),
];

const DEFAULT_CATEGORY: TrafficCategory = TrafficCategory::IotDevices;

/// Ordered protocol rules. First match wins.
const PROTOCOL_RULES: &[(&[&str], Protocol)] = &[
    (&["http", "https"], Protocol::HttpHttps),
    (&["dns"], Protocol::Dns),
    (&["smtp", "email"], Protocol::Smtp),
    (&["ssh"], Protocol::Ssh),
];

const DEFAULT_PROTOCOL: Protocol = Protocol::Other;

fn first_match<T: Copy>(haystack: &str, rules: &[(&[&str], T)], default: T) -> T {
    rules
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| haystack.contains(kw)))
        .map_or(default, |(_, label)| *label)
}

/// Map a record to its traffic-source category.
pub fn classify_source(record: &Record) -> TrafficCategory {
    first_match(&record.haystack(), CATEGORY_RULES, DEFAULT_CATEGORY)
}

/// Map a record to its protocol label.
pub fn classify_protocol(record: &Record) -> Protocol {
    first_match(&record.haystack(), PROTOCOL_RULES, DEFAULT_PROTOCOL)
}
