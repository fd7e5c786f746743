use jumpcloud::{EventPage, JumpCloudClient, JumpCloudError};
use time::{Duration, OffsetDateTime};
use tracing::error;

use crate::cursor::CursorStore;
use crate::error::ShipperError;
use crate::normalize::normalize;
use crate::sink::EventSink;

/// The cursor lands one second past the newest event so the next run does
/// not re-fetch the boundary event.
const CURSOR_STEP: Duration = Duration::seconds(1);

/// Upstream source of event pages. Implemented by [`JumpCloudClient`];
/// substituted with in-memory fakes in tests.
#[allow(async_fn_in_trait)]
pub trait EventSource {
    async fn fetch_since(&self, start: OffsetDateTime) -> Result<EventPage, JumpCloudError>;
}

impl EventSource for JumpCloudClient {
    async fn fetch_since(&self, start: OffsetDateTime) -> Result<EventPage, JumpCloudError> {
        self.events_since(start).await
    }
}

/// What a completed run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The upstream had nothing new; the cursor was left untouched.
    NoEvents,
    Shipped {
        written: usize,
        failed: usize,
        next_cursor: OffsetDateTime,
    },
}

/// Runs one fetch → decode → write → advance cycle.
///
/// Fetch and decode failures abort with the cursor untouched; nothing has
/// been written at that point. A failed append is logged and skipped, and its
/// timestamp still participates in the cursor computation — the run favors
/// cursor progress over guaranteed delivery of every line. Failing to
/// persist the cursor is fatal even after successful writes: the next run
/// then re-fetches and re-writes the same events (at-least-once delivery).
pub async fn run_once<S, C, K>(
    source: &S,
    cursor: &mut C,
    sink: &mut K,
) -> Result<RunOutcome, ShipperError>
where
    S: EventSource,
    C: CursorStore,
    K: EventSink,
{
    let since = cursor.last_time();
    let page = source.fetch_since(since).await?;
    if page.is_empty() {
        // Advancing on an empty page could skip events that land between
        // polls with a timestamp at or before the window edge.
        return Ok(RunOutcome::NoEvents);
    }

    let mut newest: Option<OffsetDateTime> = None;
    let mut written = 0usize;
    let mut failed = 0usize;
    for event in page.into_events() {
        let timestamp = event.timestamp();
        if newest.map_or(true, |seen| timestamp > seen) {
            newest = Some(timestamp);
        }

        let record = normalize(&event);
        match sink.append(&record.line).await {
            Ok(()) => written += 1,
            Err(err) => {
                failed += 1;
                error!(kind = record.kind.as_str(), "failed to append event: {err}");
            }
        }
    }

    let newest = newest.expect("non-empty page yields at least one timestamp");
    let next_cursor = newest + CURSOR_STEP;
    cursor.update_last(next_cursor)?;

    Ok(RunOutcome::Shipped {
        written,
        failed,
        next_cursor,
    })
}
