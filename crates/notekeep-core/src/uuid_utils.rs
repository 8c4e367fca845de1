//! UUID v7 utilities for time-ordered note identifiers.
//!
//! UUIDv7 embeds a millisecond Unix timestamp in its first 48 bits followed
//! by 74 random bits, so ids sort by creation time and two notes created in
//! the same millisecond by different clients do not collide.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

/// Generate a new UUIDv7 identifier.
///
/// # Example
///
/// ```
/// use notekeep_core::uuid_utils::new_v7;
///
/// let id = new_v7();
/// assert_eq!(id.get_version_num(), 7);
/// ```
#[inline]
pub fn new_v7() -> Uuid {
    Uuid::now_v7()
}

/// Generate a UUIDv7 together with the timestamp embedded in it.
///
/// Stores use the returned timestamp as `created_at_utc` so that ordering
/// by id and ordering by creation time agree.
pub fn new_v7_with_timestamp() -> (Uuid, DateTime<Utc>) {
    let id = new_v7();
    let ts = extract_timestamp(&id).unwrap_or_else(Utc::now);
    (id, ts)
}

/// Extract the timestamp from a UUIDv7.
///
/// Returns `None` if the UUID is not version 7.
///
/// # Example
///
/// ```
/// use notekeep_core::uuid_utils::{new_v7, extract_timestamp};
///
/// let id = new_v7();
/// let ts = extract_timestamp(&id).expect("should be v7");
/// ```
pub fn extract_timestamp(uuid: &Uuid) -> Option<DateTime<Utc>> {
    if !is_v7(uuid) {
        return None;
    }

    let bytes = uuid.as_bytes();
    let millis = ((bytes[0] as u64) << 40)
        | ((bytes[1] as u64) << 32)
        | ((bytes[2] as u64) << 24)
        | ((bytes[3] as u64) << 16)
        | ((bytes[4] as u64) << 8)
        | (bytes[5] as u64);

    Utc.timestamp_millis_opt(millis as i64).single()
}

/// Check if a UUID is version 7.
#[inline]
pub fn is_v7(uuid: &Uuid) -> bool {
    uuid.get_version_num() == 7
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_v7_is_v7() {
        assert!(is_v7(&new_v7()));
    }

    #[test]
    fn test_extract_timestamp_close_to_now() {
        let before = Utc::now() - Duration::milliseconds(1);
        let ts = extract_timestamp(&new_v7()).unwrap();
        let after = Utc::now() + Duration::milliseconds(1);
        assert!(ts >= before && ts <= after);
    }

    #[test]
    fn test_extract_timestamp_rejects_v4() {
        assert!(extract_timestamp(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_with_timestamp_agrees_with_id() {
        let (id, ts) = new_v7_with_timestamp();
        assert_eq!(extract_timestamp(&id), Some(ts));
    }

    #[test]
    fn test_ids_are_distinct_within_a_millisecond() {
        let ids: std::collections::HashSet<Uuid> = (0..1000).map(|_| new_v7()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
