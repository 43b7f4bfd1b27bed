//! Canonical domain types produced and consumed by the pipeline.

pub mod record;
pub mod snapshot;
pub mod time_range;

pub use record::Record;
pub use snapshot::{
    EventSeverity, Protocol, SecurityEvent, SecurityStatus, SnapshotOrigin, SystemEvent,
    SystemStatus, TimePoint, TrafficCategory, TrafficSnapshot,
};
pub use time_range::TimeRange;
