//! Centralized default constants for notekeep.
//!
//! All crates reference these constants instead of defining their own
//! magic numbers.

// =============================================================================
// SUMMARY
// =============================================================================

/// Number of characters of note content kept in a summary.
pub const SUMMARY_MAX_CHARS: usize = 100;

/// Marker appended to every summary.
pub const SUMMARY_ELLIPSIS: &str = "...";

// =============================================================================
// NOTES
// =============================================================================

/// Name of the notes table / data service collection.
pub const NOTES_TABLE: &str = "notes";

/// Display format for the note `date` field (en-US short date, e.g. `10/19/2026`).
pub const DATE_DISPLAY_FORMAT: &str = "%-m/%-d/%Y";

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default store backend.
pub const NOTE_STORE: &str = "memory";

/// Default PostgreSQL URL.
pub const DATABASE_URL: &str = "postgres://localhost/notekeep";

/// Default origins allowed by CORS.
pub const ALLOWED_ORIGINS: &str = "http://localhost:3000";

/// Upper bound on PostgreSQL connections held by the API.
pub const DB_MAX_CONNECTIONS: u32 = 5;

/// Maximum accepted request body (notes are short text).
pub const REQUEST_BODY_LIMIT_BYTES: usize = 1024 * 1024;

// =============================================================================
// DATA SERVICE
// =============================================================================

/// Timeout for a single data service call or pool acquisition, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 5;

/// Path prefix of the hosted data service REST API.
pub const DATA_SERVICE_REST_PATH: &str = "/rest/v1";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_fits_in_103_chars() {
        assert_eq!(SUMMARY_MAX_CHARS + SUMMARY_ELLIPSIS.chars().count(), 103);
    }

    #[test]
    fn test_timeout_is_bounded() {
        assert!(REQUEST_TIMEOUT_SECS > 0 && REQUEST_TIMEOUT_SECS <= 30);
    }
}
