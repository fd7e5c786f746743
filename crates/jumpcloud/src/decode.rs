use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::JumpCloudError;
use crate::events::{EventKind, EventPage};

/// Decodes a raw events response body into a page partitioned by kind.
///
/// Each record is dispatched on its `service` discriminator and decoded into
/// the matching typed shape in a single pass. Records with a missing or
/// unrecognized discriminator are skipped, so the upstream can add new event
/// kinds without breaking the run. A recognized kind whose body does not
/// match its expected shape fails the whole page: a structural mismatch means
/// the API contract drifted, and that has to surface rather than be partially
/// ingested.
pub fn decode_events(body: &str) -> Result<EventPage, JumpCloudError> {
    let records: Vec<Value> = serde_json::from_str(body).map_err(JumpCloudError::ResponseShape)?;

    let mut page = EventPage::default();
    for record in records {
        let Some(service) = record.get("service").and_then(Value::as_str) else {
            debug!("skipping event without a service discriminator");
            continue;
        };
        let Some(kind) = EventKind::from_service(service) else {
            debug!(service, "skipping event of unrecognized kind");
            continue;
        };
        match kind {
            EventKind::Directory => page.directory.push(decode_record(kind, record)?),
            EventKind::Ldap => page.ldap.push(decode_record(kind, record)?),
            EventKind::Systems => page.systems.push(decode_record(kind, record)?),
            EventKind::Radius => page.radius.push(decode_record(kind, record)?),
            EventKind::Sso => page.sso.push(decode_record(kind, record)?),
            EventKind::Admin => page.admin.push(decode_record(kind, record)?),
        }
    }
    Ok(page)
}

fn decode_record<T: DeserializeOwned>(kind: EventKind, record: Value) -> Result<T, JumpCloudError> {
    serde_json::from_value(record).map_err(|source| JumpCloudError::EventShape {
        service: kind.as_str(),
        source,
    })
}
