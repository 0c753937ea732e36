// Session - the aggregate owning the event log and derived counters
//
// One Session per simulated page load. Producers hold a SharedSession handle
// and record through it; every recorder operation runs to completion under
// the lock, so event order matches call order and the counters never tear.
// There is no global instance: construction and finalize are explicit.

use crate::device::{DeviceInfo, DeviceProbe};
use crate::events::{self, Event};
use crate::scroll::{self, ScrollMetrics};
use crate::sink::EventSink;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Handle shared with every producer component
pub type SharedSession = Arc<Mutex<Session>>;

pub struct Session {
    started_at: DateTime<Utc>,
    page_url: String,
    events: Vec<Event>,
    max_scroll_depth: u8,
    form_interactions: u64,
    sink: Box<dyn EventSink>,
    probe: Box<dyn DeviceProbe>,
}

/// Serializable point-in-time projection of session state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session: SessionStats,
    pub device: DeviceInfo,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub started_at: DateTime<Utc>,
    /// Invocation instant of the export, not session close
    pub ended_at: DateTime<Utc>,
    pub duration_seconds: f64,
    pub max_scroll_depth: u8,
    pub form_interaction_count: u64,
}

impl Session {
    pub fn new(
        page_url: &str,
        sink: impl EventSink + 'static,
        probe: impl DeviceProbe + 'static,
    ) -> Self {
        Self {
            started_at: Utc::now(),
            page_url: page_url.to_string(),
            events: Vec::new(),
            max_scroll_depth: 0,
            form_interactions: 0,
            sink: Box::new(sink),
            probe: Box::new(probe),
        }
    }

    /// Construct wrapped in the shared handle producers expect
    pub fn shared(
        page_url: &str,
        sink: impl EventSink + 'static,
        probe: impl DeviceProbe + 'static,
    ) -> SharedSession {
        Arc::new(Mutex::new(Self::new(page_url, sink, probe)))
    }

    /// Record an event with no metadata
    pub fn record(&mut self, name: &str) {
        self.record_with(name, Value::Null);
    }

    /// Record an event with arbitrary metadata. Non-object `data` is treated
    /// as empty; an empty `name` drops the event with a warning.
    pub fn record_with(&mut self, name: &str, data: Value) {
        if name.is_empty() {
            tracing::warn!("dropping event with empty name");
            return;
        }
        let event = Event::new(name, events::normalize_data(data), &self.page_url);
        self.sink.line(&event.to_line());
        tracing::debug!(name = %event.name, total = self.events.len() + 1, "event recorded");
        self.events.push(event);
    }

    /// Feed one scroll signal into the depth ratchet.
    ///
    /// The maximum only moves up. A milestone event fires when the updated
    /// maximum lands exactly on 25, 50, 75 or 100 after rounding; a jump
    /// that skips over a milestone never fires it retroactively.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) {
        let depth = metrics.depth_percent();
        if depth > self.max_scroll_depth {
            self.max_scroll_depth = depth;
            if scroll::is_milestone(depth) {
                self.record_with(&format!("scroll_depth_{depth}"), json!({ "depth": depth }));
            }
        }
    }

    /// Count one field-focus signal. No deduplication: refocusing the same
    /// field increments again.
    pub fn on_field_focus(&mut self, field: &str) {
        self.form_interactions += 1;
        self.record_with("form_field_focused", json!({ "fieldName": field }));
    }

    /// Record the page-load event carrying the device facts visible at load
    pub fn record_page_load(&mut self) {
        let device = self.probe.sample();
        self.record_with(
            "page_loaded",
            json!({ "userAgent": device.user_agent, "viewport": device.viewport }),
        );
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn max_scroll_depth(&self) -> u8 {
        self.max_scroll_depth
    }

    pub fn form_interactions(&self) -> u64 {
        self.form_interactions
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Write the multi-section summary report to the sink. Read-only
    /// projection over current state; callable at any time.
    pub fn render_summary(&self) {
        let device = self.probe.sample();
        for line in crate::summary::render(self, &device) {
            self.sink.line(&line);
        }
    }

    /// Export a snapshot of "now". Two immediate calls differ only in
    /// `endedAt`/`durationSeconds`.
    pub fn export_snapshot(&self) -> SessionSnapshot {
        let ended_at = Utc::now();
        SessionSnapshot {
            session: SessionStats {
                started_at: self.started_at,
                ended_at,
                duration_seconds: duration_seconds(self.started_at, ended_at),
                max_scroll_depth: self.max_scroll_depth,
                form_interaction_count: self.form_interactions,
            },
            device: self.probe.sample(),
            events: self.events.clone(),
        }
    }

    /// Session-end call: render the summary, hand back the final snapshot
    pub fn finalize(&self) -> SessionSnapshot {
        self.render_summary();
        self.export_snapshot()
    }
}

/// Elapsed seconds between two instants, rounded to two decimals
pub fn duration_seconds(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let secs = (end - start).num_milliseconds() as f64 / 1000.0;
    (secs * 100.0).round() / 100.0
}

/// Record through a shared handle without holding the lock across calls
pub fn record(session: &SharedSession, name: &str) {
    session.lock().unwrap().record(name);
}

pub fn record_with(session: &SharedSession, name: &str, data: Value) {
    session.lock().unwrap().record_with(name, data);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::StaticProbe;
    use crate::sink::MemorySink;

    fn test_probe() -> StaticProbe {
        StaticProbe::new(1280, 800, "TestAgent/1.0", "en-US", "Linux x86_64")
    }

    fn test_session() -> (Session, MemorySink) {
        let sink = MemorySink::new();
        let session = Session::new("https://example.com/", sink.clone(), test_probe());
        (session, sink)
    }

    /// Metrics where scroll_y maps 1:1 onto the percentage (100px scrollable)
    fn metrics(percent: f64) -> ScrollMetrics {
        ScrollMetrics::new(percent, 900.0, 800.0)
    }

    fn names(session: &Session) -> Vec<&str> {
        session.events().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_record_preserves_count_and_order() {
        let (mut session, sink) = test_session();
        session.record("page_loaded");
        session.record("mobile_menu_toggled");
        session.record("page_hidden");
        assert_eq!(session.events().len(), 3);
        assert_eq!(
            names(&session),
            vec!["page_loaded", "mobile_menu_toggled", "page_hidden"]
        );
        // One sink line per event
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn test_record_with_non_object_data_becomes_empty() {
        let (mut session, _sink) = test_session();
        session.record_with("page_loaded", json!("not an object"));
        assert!(session.events()[0].data.is_empty());
    }

    #[test]
    fn test_empty_name_is_dropped() {
        let (mut session, sink) = test_session();
        session.record("");
        assert!(session.events().is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_max_scroll_depth_is_monotonic() {
        let (mut session, _sink) = test_session();
        let mut previous = 0;
        for pct in [10.0, 80.0, 30.0, 95.0, 5.0, 95.0, 0.0] {
            session.on_scroll(metrics(pct));
            assert!(session.max_scroll_depth() >= previous);
            previous = session.max_scroll_depth();
        }
        assert_eq!(session.max_scroll_depth(), 95);
    }

    #[test]
    fn test_milestone_vector_fires_exactly_25_and_75() {
        let (mut session, _sink) = test_session();
        for pct in [10.0, 25.0, 25.0, 60.0, 75.0, 50.0] {
            session.on_scroll(metrics(pct));
        }
        assert_eq!(names(&session), vec!["scroll_depth_25", "scroll_depth_75"]);
        assert_eq!(session.events()[0].data["depth"], json!(25));
        assert_eq!(session.events()[1].data["depth"], json!(75));
        // The trailing 50 must not regress the ratchet
        assert_eq!(session.max_scroll_depth(), 75);
    }

    #[test]
    fn test_skipping_over_a_milestone_fires_nothing() {
        let (mut session, _sink) = test_session();
        session.on_scroll(metrics(10.0));
        session.on_scroll(metrics(60.0));
        assert!(session.events().is_empty());
        assert_eq!(session.max_scroll_depth(), 60);
    }

    #[test]
    fn test_exact_landing_on_100_fires() {
        let (mut session, _sink) = test_session();
        session.on_scroll(metrics(100.0));
        assert_eq!(names(&session), vec!["scroll_depth_100"]);
    }

    #[test]
    fn test_page_load_event_carries_device_facts() {
        let (mut session, _sink) = test_session();
        session.record_page_load();
        let event = &session.events()[0];
        assert_eq!(event.name, "page_loaded");
        assert_eq!(event.data["userAgent"], json!("TestAgent/1.0"));
        assert_eq!(event.data["viewport"], json!("1280x800"));
    }

    #[test]
    fn test_form_interactions_count_every_focus() {
        let (mut session, _sink) = test_session();
        for field in ["email", "email", "name", "email", "message"] {
            session.on_field_focus(field);
        }
        assert_eq!(session.form_interactions(), 5);
        assert_eq!(session.events().len(), 5);
        assert_eq!(session.events()[0].data["fieldName"], json!("email"));
    }

    #[test]
    fn test_snapshot_shape_and_repeatability() {
        let (mut session, _sink) = test_session();
        session.on_scroll(metrics(50.0));
        session.on_field_focus("email");

        let first = session.export_snapshot();
        let second = session.export_snapshot();

        assert!(second.session.duration_seconds >= first.session.duration_seconds);
        assert_eq!(first.session.max_scroll_depth, second.session.max_scroll_depth);
        assert_eq!(
            first.session.form_interaction_count,
            second.session.form_interaction_count
        );
        assert_eq!(first.events.len(), second.events.len());
    }

    #[test]
    fn test_snapshot_serializes_with_contract_fields() {
        let (mut session, _sink) = test_session();
        session.record("page_loaded");
        let value = serde_json::to_value(session.export_snapshot()).unwrap();

        for field in [
            "startedAt",
            "endedAt",
            "durationSeconds",
            "maxScrollDepth",
            "formInteractionCount",
        ] {
            assert!(value["session"].get(field).is_some(), "missing {field}");
        }
        for field in ["viewport", "userAgent", "locale", "platform"] {
            assert!(value["device"].get(field).is_some(), "missing {field}");
        }
        assert_eq!(value["events"].as_array().unwrap().len(), 1);
        assert_eq!(value["device"]["viewport"], json!("1280x800"));
    }

    #[test]
    fn test_duration_seconds_rounds_to_two_decimals() {
        let start = Utc::now();
        let end = start + chrono::Duration::milliseconds(12_345);
        assert_eq!(duration_seconds(start, end), 12.35);
        let end = start + chrono::Duration::milliseconds(12_344);
        assert_eq!(duration_seconds(start, end), 12.34);
    }

    #[test]
    fn test_shared_helpers_record_through_handle() {
        let sink = MemorySink::new();
        let session = Session::shared("https://example.com/", sink.clone(), test_probe());
        record(&session, "page_loaded");
        record_with(&session, "smooth_scroll", json!({ "target": "#contact" }));
        let guard = session.lock().unwrap();
        assert_eq!(names(&guard), vec!["page_loaded", "smooth_scroll"]);
    }
}
