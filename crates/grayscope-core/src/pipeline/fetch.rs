// Staged snapshot retrieval: live search → inputs metadata → synthetic.
//
// `fetch` never returns an error. Each stage failure is downgraded to
// a status message before the next stage runs, so the caller always
// receives a snapshot satisfying the full schema. An empty search
// result is a success (all-zero snapshot), not a fallback trigger.
//
// Routing: auth and transport failures on the primary query try the
// inputs endpoint next; a malformed body at either stage goes straight
// to synthetic data.

use chrono::{DateTime, Utc};
use serde_json::Map;
use tracing::{debug, warn};

use grayscope_api::{Error, GraylogClient, Input, TransportConfig};

use crate::config::FetchConfig;
use crate::model::{Record, SnapshotOrigin, TimeRange, TrafficSnapshot};
use crate::pipeline::aggregate::SourceWeighting;
use crate::pipeline::{build_snapshot, normalize, synthetic};
use crate::status::{Severity, StatusReporter};

/// Staged retrieval facade wrapping the whole pipeline into one pass.
///
/// Owns the HTTP client and a handle to the session's
/// [`StatusReporter`]; holds no other mutable state, so one refresh
/// cycle never leaks into the next.
pub struct Fetcher {
    client: GraylogClient,
    config: FetchConfig,
    status: StatusReporter,
}

impl Fetcher {
    /// Build a fetcher (and its HTTP client) from a config.
    pub fn new(config: FetchConfig, status: StatusReporter) -> Result<Self, Error> {
        let transport = TransportConfig {
            tls: config.tls.clone().into(),
            timeout: config.timeout,
        };
        let client = GraylogClient::new(
            config.base_url.clone(),
            config.username.clone(),
            config.password.clone(),
            &transport,
        )?;
        Ok(Self {
            client,
            config,
            status,
        })
    }

    /// Build a fetcher around an existing client.
    pub fn with_client(client: GraylogClient, config: FetchConfig, status: StatusReporter) -> Self {
        Self {
            client,
            config,
            status,
        }
    }

    /// The session's status reporter.
    pub fn status(&self) -> &StatusReporter {
        &self.status
    }

    /// Run one refresh cycle for the given window. Infallible: failures
    /// degrade through the stages and end at synthetic data.
    pub async fn fetch(&self, range: TimeRange) -> TrafficSnapshot {
        let now = Utc::now();

        match self.fetch_live(range, now).await {
            Ok(snapshot) => {
                debug!("live search succeeded");
                self.status.report(
                    "graylog_data",
                    "Connected to Graylog - displaying real data",
                    Severity::Success,
                );
                return snapshot;
            }
            Err(err) => {
                warn!(%err, "primary search query failed");
                self.status.report(
                    "graylog_search_failed",
                    format!("Error fetching data from Graylog: {err}"),
                    Severity::Error,
                );
                // A malformed body is not a connectivity problem; the
                // inputs endpoint is skipped for it.
                if matches!(err, Error::Deserialization { .. }) {
                    return self.sample_snapshot(range, now);
                }
            }
        }

        match self.fetch_inputs_only(range, now).await {
            Ok((snapshot, input_count)) => {
                debug!(input_count, "inputs query succeeded");
                self.status.report(
                    "graylog_connection",
                    format!("Connected to Graylog - Found {input_count} system inputs"),
                    Severity::Success,
                );
                return snapshot;
            }
            Err(err) => {
                warn!(%err, "inputs query failed");
                self.status.report(
                    "graylog_inputs_failed",
                    format!("Could not reach Graylog inputs API: {err}"),
                    Severity::Error,
                );
            }
        }

        self.sample_snapshot(range, now)
    }

    /// Final stage: locally generated sample data.
    fn sample_snapshot(&self, range: TimeRange, now: DateTime<Utc>) -> TrafficSnapshot {
        debug!("falling back to synthetic data");
        self.status.report(
            "sample_data",
            "Graylog unavailable - displaying sample data",
            Severity::Info,
        );
        synthetic::generate(range, now)
    }

    /// Primary stage: full-text search over the window.
    async fn fetch_live(
        &self,
        range: TimeRange,
        now: DateTime<Utc>,
    ) -> Result<TrafficSnapshot, Error> {
        let response = self
            .client
            .search_relative(&self.config.query, range.as_secs(), self.config.limit)
            .await?;

        let records: Vec<Record> = response.messages.iter().filter_map(normalize::normalize).collect();
        debug!(
            raw = response.messages.len(),
            normalized = records.len(),
            "normalized search results"
        );

        Ok(build_snapshot(
            &records,
            range,
            now,
            &self.config.weighting,
            SnapshotOrigin::Live,
        ))
    }

    /// Secondary stage: reduced-fidelity snapshot from input metadata
    /// only (counts, no content). The series stays zero-filled because
    /// metadata carries no timestamps.
    async fn fetch_inputs_only(
        &self,
        range: TimeRange,
        now: DateTime<Utc>,
    ) -> Result<(TrafficSnapshot, usize), Error> {
        let inputs = self.client.list_inputs().await?;
        let records: Vec<Record> = inputs.iter().map(input_record).collect();

        let snapshot = build_snapshot(
            &records,
            range,
            now,
            &SourceWeighting::MessageCount,
            SnapshotOrigin::InputsOnly,
        );
        Ok((snapshot, inputs.len()))
    }
}

/// Turn input metadata into a timestamp-less record so the same rule
/// tables distribute input counts across categories.
fn input_record(input: &Input) -> Record {
    let source = input.title.clone().unwrap_or_else(|| "input".into());
    let text = format!(
        "{} {}",
        input.title.as_deref().unwrap_or_default(),
        input.input_type.as_deref().unwrap_or_default()
    );
    Record {
        timestamp: None,
        source,
        text: text.trim().to_owned(),
        fields: Map::new(),
    }
}
