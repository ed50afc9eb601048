use chrono::{Duration, Utc};
use uuid::Uuid;

/// Primary keys are opaque strings (UUIDv7 text) generated by the server.
pub type DbId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<Utc>;

/// Generate a fresh record identifier.
///
/// UUIDv7 keeps ids roughly ordered by creation time, which makes rows easy to
/// eyeball in the database without affecting any ordering guarantees.
pub fn new_id() -> DbId {
    Uuid::now_v7().to_string()
}

/// Next `updated_at` stamp for a record last touched at `previous`.
///
/// Always strictly later than `previous`, even when the wall clock has not
/// advanced (or went backwards) since the last write.
pub fn next_timestamp(previous: Timestamp) -> Timestamp {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
