use jumpcloud::{Event, EventKind};
use serde_json::Value;

/// One event rendered as a single compact JSON line, tagged with the
/// canonical kind label. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub kind: EventKind,
    pub line: String,
}

/// Tags and formats one decoded event.
///
/// `jumpcloud_event_type` is overwritten with the canonical label for the
/// variant; the wire value is never trusted. Nothing else is dropped or
/// reshaped, and the same event always renders the same bytes.
pub fn normalize(event: &Event) -> NormalizedRecord {
    let kind = event.kind();
    let mut value = serde_json::to_value(event).expect("event model serializes infallibly");
    if let Some(record) = value.as_object_mut() {
        record.insert(
            "jumpcloud_event_type".to_string(),
            Value::String(kind.as_str().to_string()),
        );
    }
    let line = serde_json::to_string(&value).expect("event model serializes infallibly");
    NormalizedRecord { kind, line }
}
