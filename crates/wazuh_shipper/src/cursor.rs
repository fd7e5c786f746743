use time::{Duration, OffsetDateTime};

use crate::error::ShipperError;

/// How far back a first run looks when no cursor has been persisted yet.
/// Bounds the initial fetch instead of pulling unbounded history.
pub const DEFAULT_LOOKBACK: Duration = Duration::hours(1);

/// Owns the persisted "last processed time" value.
///
/// Read once at run start, written once at run end. An update must be atomic
/// with respect to a crash: a run that dies mid-write leaves the previous
/// cursor readable.
pub trait CursorStore {
    /// The last persisted cursor, or `now - DEFAULT_LOOKBACK` on a first run.
    fn last_time(&self) -> OffsetDateTime;

    /// Persists `t` as the new cursor.
    fn update_last(&mut self, t: OffsetDateTime) -> Result<(), ShipperError>;
}
