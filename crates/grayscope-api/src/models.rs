// Wire types for the two Graylog endpoints we consume.
//
// Field sets vary by Graylog version and input configuration, so
// everything beyond the envelope structure is optional and unknown
// fields are ignored.

use serde::Deserialize;

/// Response envelope for `GET /api/search/universal/relative`.
///
/// `messages` is required: a body without it is treated as malformed
/// upstream output and fails deserialization, which the core maps to
/// the next fallback stage. An empty list is a valid, successful
/// response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub messages: Vec<RawMessage>,
    pub total_results: Option<u64>,
    pub time: Option<u64>,
}

/// One search hit. The interesting payload is `message`, which Graylog
/// returns either as a flattened field object or (for some inputs) as a
/// string that may itself contain JSON. Normalization of either shape
/// is the core's job; this type just carries the raw value.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMessage {
    pub message: serde_json::Value,
    pub timestamp: Option<String>,
    pub index: Option<String>,
}

/// Response envelope for `GET /api/system/inputs`.
#[derive(Debug, Clone, Deserialize)]
pub struct InputsResponse {
    pub inputs: Vec<Input>,
    pub total: Option<u64>,
}

/// One configured Graylog input (metadata only, no message content).
#[derive(Debug, Clone, Deserialize)]
pub struct Input {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub input_type: Option<String>,
    pub global: Option<bool>,
}
