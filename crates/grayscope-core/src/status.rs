// Session-scoped status reporting.
//
// Each refresh session owns one reporter; there is no ambient global.
// The map is keyed by message id and append-only apart from dismissal,
// which hides an entry rather than deleting it so a later `report`
// with the same id stays a no-op.

use std::sync::{Arc, Mutex};

use indexmap::IndexMap;
use serde::Serialize;
use strum::Display;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// One dismissible notification describing pipeline health.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub id: String,
    pub text: String,
    pub severity: Severity,
    #[serde(skip)]
    dismissed: bool,
}

impl StatusMessage {
    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }
}

/// Deduplicated-by-id notification log for one session.
///
/// Cheap to clone — clones share the underlying map, so a UI can hold
/// a handle while the fetcher reports through another.
#[derive(Debug, Clone, Default)]
pub struct StatusReporter {
    inner: Arc<Mutex<IndexMap<String, StatusMessage>>>,
}

impl StatusReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message. Idempotent: a second call with an existing id
    /// is a no-op (first write wins for that id within the session).
    pub fn report(&self, id: &str, text: impl Into<String>, severity: Severity) {
        let mut map = self.inner.lock().expect("status lock poisoned");
        map.entry(id.to_owned()).or_insert_with(|| StatusMessage {
            id: id.to_owned(),
            text: text.into(),
            severity,
            dismissed: false,
        });
    }

    /// Hide a message by id. Unknown ids are ignored.
    pub fn dismiss(&self, id: &str) {
        let mut map = self.inner.lock().expect("status lock poisoned");
        if let Some(message) = map.get_mut(id) {
            message.dismissed = true;
        }
    }

    /// Active (non-dismissed) messages in insertion order.
    pub fn active(&self) -> Vec<StatusMessage> {
        let map = self.inner.lock().expect("status lock poisoned");
        map.values().filter(|m| !m.dismissed).cloned().collect()
    }

    /// Total recorded messages, dismissed included.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("status lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_is_idempotent_by_id() {
        let reporter = StatusReporter::new();
        reporter.report("conn", "Connected", Severity::Success);
        reporter.report("conn", "Connected again", Severity::Error);

        let active = reporter.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].text, "Connected");
        assert_eq!(active[0].severity, Severity::Success);
    }

    #[test]
    fn dismiss_hides_without_deleting() {
        let reporter = StatusReporter::new();
        reporter.report("conn", "Connected", Severity::Success);
        reporter.dismiss("conn");

        assert!(reporter.active().is_empty());
        assert_eq!(reporter.len(), 1);

        // Re-reporting a dismissed id must not resurrect it.
        reporter.report("conn", "Connected", Severity::Success);
        assert!(reporter.active().is_empty());
    }

    #[test]
    fn active_preserves_insertion_order() {
        let reporter = StatusReporter::new();
        reporter.report("a", "first", Severity::Info);
        reporter.report("b", "second", Severity::Error);
        reporter.report("c", "third", Severity::Success);
        reporter.dismiss("b");

        let ids: Vec<_> = reporter.active().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn dismissing_unknown_id_is_a_noop() {
        let reporter = StatusReporter::new();
        reporter.dismiss("missing");
        assert!(reporter.is_empty());
    }

    #[test]
    fn clones_share_state() {
        let reporter = StatusReporter::new();
        let handle = reporter.clone();
        reporter.report("conn", "Connected", Severity::Success);
        assert_eq!(handle.active().len(), 1);
    }
}
