//! Traffic-snapshot pipeline between `grayscope-api` and presentation
//! consumers (CLI, dashboards).
//!
//! This crate owns the domain model and the ingestion pipeline:
//!
//! - **[`Fetcher`]** — Staged retrieval facade:
//!   [`fetch()`](Fetcher::fetch) tries the live search query, degrades
//!   to input metadata, and finally to synthetic data. It never fails;
//!   every stage failure becomes a [`StatusMessage`] and the next stage
//!   runs, so the caller always receives a valid [`TrafficSnapshot`].
//!
//! - **Pipeline stages** ([`pipeline`]) — Record normalization
//!   (including embedded-JSON message bodies), priority-ordered keyword
//!   classification, capped security/system event extraction, and
//!   hour-bucketed aggregation with a zero-filled series.
//!
//! - **[`StatusReporter`]** — Session-scoped notification log,
//!   deduplicated by id and dismissible, read by the UI layer.
//!
//! - **Domain model** ([`model`]) — Immutable [`Record`] and
//!   [`TrafficSnapshot`] value types plus the fixed category, protocol,
//!   and time-range enumerations.

pub mod config;
pub mod model;
pub mod pipeline;
pub mod status;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{FetchConfig, TlsVerification};
pub use pipeline::aggregate::SourceWeighting;
pub use pipeline::fetch::Fetcher;
pub use status::{Severity, StatusMessage, StatusReporter};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Protocol, Record, SecurityEvent, SnapshotOrigin, SystemEvent, TimePoint, TimeRange,
    TrafficCategory, TrafficSnapshot,
};
