// Toast notifications
//
// Non-blocking messages that auto-dismiss after a configurable duration.
// Every displayed toast is also recorded as a toast_displayed event.

use crate::session::{self, SharedSession};
use serde_json::json;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

/// A single toast, expiring `duration` after creation
#[derive(Debug)]
pub struct Toast {
    #[allow(dead_code)] // Reserved for page rendering
    pub message: String,
    #[allow(dead_code)]
    pub kind: ToastKind,
    created_at: Instant,
    duration: Duration,
}

impl Toast {
    fn new(message: &str, kind: ToastKind, duration: Duration) -> Self {
        Self {
            message: message.to_string(),
            kind,
            created_at: Instant::now(),
            duration,
        }
    }

    /// Check if the toast has expired and should be removed
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }
}

/// Holds the live toasts for the page
pub struct ToastRack {
    session: SharedSession,
    toasts: Vec<Toast>,
    duration: Duration,
}

impl ToastRack {
    pub fn new(session: SharedSession, duration: Duration) -> Self {
        Self {
            session,
            toasts: Vec::new(),
            duration,
        }
    }

    pub fn success(&mut self, message: &str) {
        self.show(message, ToastKind::Success);
    }

    pub fn error(&mut self, message: &str) {
        self.show(message, ToastKind::Error);
    }

    fn show(&mut self, message: &str, kind: ToastKind) {
        session::record_with(
            &self.session,
            "toast_displayed",
            json!({ "type": kind.as_str(), "message": message }),
        );
        self.toasts.push(Toast::new(message, kind, self.duration));
    }

    /// Drop expired toasts
    pub fn prune(&mut self) {
        self.toasts.retain(|toast| !toast.is_expired());
    }

    #[allow(dead_code)] // Reserved for page rendering
    pub fn active(&self) -> &[Toast] {
        &self.toasts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::StaticProbe;
    use crate::session::Session;
    use crate::sink::MemorySink;

    fn rack(duration: Duration) -> (ToastRack, SharedSession) {
        let session = Session::shared(
            "https://example.com/",
            MemorySink::new(),
            StaticProbe::new(1280, 800, "TestAgent/1.0", "en-US", "Linux x86_64"),
        );
        (ToastRack::new(session.clone(), duration), session)
    }

    #[test]
    fn test_toast_records_event_with_kind_and_message() {
        let (mut rack, session) = rack(Duration::from_secs(4));
        rack.error("Please enter a valid email");
        rack.success("✓ Subscribed! Check your inbox.");

        let guard = session.lock().unwrap();
        let events = guard.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "toast_displayed");
        assert_eq!(events[0].data["type"], json!("error"));
        assert_eq!(events[0].data["message"], json!("Please enter a valid email"));
        assert_eq!(events[1].data["type"], json!("success"));
    }

    #[test]
    fn test_prune_drops_expired_toasts() {
        let (mut rack, _session) = rack(Duration::from_millis(10));
        rack.success("short lived");
        assert_eq!(rack.active().len(), 1);
        std::thread::sleep(Duration::from_millis(25));
        rack.prune();
        assert!(rack.active().is_empty());
    }

    #[test]
    fn test_prune_keeps_live_toasts() {
        let (mut rack, _session) = rack(Duration::from_secs(60));
        rack.success("still fresh");
        rack.prune();
        assert_eq!(rack.active().len(), 1);
        assert_eq!(rack.active()[0].kind, ToastKind::Success);
    }
}
