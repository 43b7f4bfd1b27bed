// Raw Graylog messages → canonical Records.
//
// A search hit's `message` value may be a field object, a string that
// is itself JSON, or an opaque string. Malformed or empty entries are
// dropped silently (they are not pipeline failures). Required fields
// are completed from declared defaults before downstream stages run,
// so classification and aggregation never special-case missing data.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use grayscope_api::RawMessage;

use crate::model::Record;

const DEFAULT_SOURCE: &str = "unknown";

/// Normalize one raw search hit. Returns `None` for malformed or empty
/// entries.
pub fn normalize(raw: &RawMessage) -> Option<Record> {
    let fields = flatten_message(&raw.message)?;

    // Message-level timestamp wins; the envelope timestamp fills in for
    // inputs that don't set one. Unparsable values degrade to None —
    // the record stays classifiable but leaves the time series.
    let timestamp = fields
        .get("timestamp")
        .and_then(Value::as_str)
        .or(raw.timestamp.as_deref())
        .and_then(parse_timestamp);

    let source = fields
        .get("source")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SOURCE)
        .to_owned();

    let text = fields
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| fields.get("full_message").and_then(Value::as_str))
        .map_or_else(|| Value::Object(fields.clone()).to_string(), str::to_owned);

    Some(Record {
        timestamp,
        source,
        text,
        fields,
    })
}

/// Flatten the message body into a field map.
///
/// Strings are parsed as embedded JSON when possible; otherwise the
/// whole string becomes the `message` field.
fn flatten_message(value: &Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) if !map.is_empty() => Some(map.clone()),
        Value::String(s) if !s.trim().is_empty() => match serde_json::from_str::<Value>(s) {
            Ok(Value::Object(map)) if !map.is_empty() => Some(map),
            _ => {
                let mut map = Map::new();
                map.insert("message".into(), Value::String(s.clone()));
                Some(map)
            }
        },
        _ => None,
    }
}

/// Parse an ISO-8601 timestamp with a trailing `Z` designator into a
/// timezone-aware instant.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            // Graylog's search API also emits "2025-01-01 00:00:00.000"
            // without a designator; treat it as UTC.
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn raw(message: Value) -> RawMessage {
        RawMessage {
            message,
            timestamp: None,
            index: None,
        }
    }

    #[test]
    fn object_message_is_flattened() {
        let record = normalize(&raw(json!({
            "source": "router-1",
            "message": "DNS query from 192.168.1.5",
            "timestamp": "2025-01-01T12:00:00.000Z"
        })))
        .unwrap();

        assert_eq!(record.source, "router-1");
        assert_eq!(record.text, "DNS query from 192.168.1.5");
        assert_eq!(
            record.timestamp,
            Some(Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn embedded_json_string_is_parsed() {
        let record = normalize(&raw(Value::String(
            r#"{"source":"web-01","message":"GET / via https"}"#.into(),
        )))
        .unwrap();

        assert_eq!(record.source, "web-01");
        assert_eq!(record.text, "GET / via https");
        assert_eq!(record.timestamp, None);
    }

    #[test]
    fn opaque_string_becomes_message_text() {
        let record = normalize(&raw(Value::String("kernel: eth0 link up".into()))).unwrap();

        assert_eq!(record.source, "unknown");
        assert_eq!(record.text, "kernel: eth0 link up");
    }

    #[test]
    fn malformed_entries_are_dropped() {
        assert!(normalize(&raw(Value::Null)).is_none());
        assert!(normalize(&raw(json!({}))).is_none());
        assert!(normalize(&raw(Value::String("   ".into()))).is_none());
        assert!(normalize(&raw(json!(42))).is_none());
    }

    #[test]
    fn unparsable_timestamp_is_preserved_as_none() {
        let record = normalize(&raw(json!({
            "source": "web-01",
            "message": "hello",
            "timestamp": "not-a-time"
        })))
        .unwrap();

        assert_eq!(record.timestamp, None);
        assert_eq!(record.source, "web-01");
    }

    #[test]
    fn envelope_timestamp_fills_in() {
        let mut entry = raw(json!({ "message": "hello" }));
        entry.timestamp = Some("2025-01-01T00:00:00Z".into());

        let record = normalize(&entry).unwrap();
        assert_eq!(
            record.timestamp,
            Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn space_separated_timestamp_parses_as_utc() {
        assert_eq!(
            parse_timestamp("2025-01-01 06:30:00.000"),
            Some(Utc.with_ymd_and_hms(2025, 1, 1, 6, 30, 0).unwrap())
        );
    }

    #[test]
    fn text_falls_back_to_rendered_fields() {
        let record = normalize(&raw(json!({ "source": "iot-hub", "reading": 42 }))).unwrap();
        assert!(record.text.contains("reading"));
    }
}
