// Events recorded into the session log
//
// Every user-visible action on the page (menu toggle, form submit, scroll
// milestone, ...) becomes one Event appended to the session. Events are
// immutable after construction and serialize with the camelCase field names
// that downstream snapshot consumers depend on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Open key/value metadata attached to an event. Values are whatever JSON
/// the producer supplied; flat string/number/boolean payloads in practice.
pub type EventData = serde_json::Map<String, Value>;

/// One recorded occurrence in the session log
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Assigned at record time
    pub timestamp: DateTime<Utc>,
    /// Short identifier, e.g. "scroll_depth_50"
    pub name: String,
    #[serde(default)]
    pub data: EventData,
    /// Page URL at record time
    pub source_location: String,
}

impl Event {
    pub fn new(name: &str, data: EventData, source_location: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            name: name.to_string(),
            data,
            source_location: source_location.to_string(),
        }
    }

    /// Line written to the display sink when the event is recorded
    pub fn to_line(&self) -> String {
        format!("[analytics] {} {}", self.name, Value::Object(self.data.clone()))
    }
}

/// Coerce arbitrary producer input into event metadata. Anything that is not
/// a JSON object is treated as empty rather than rejected.
pub fn normalize_data(value: Value) -> EventData {
    match value {
        Value::Object(map) => map,
        _ => EventData::new(),
    }
}
