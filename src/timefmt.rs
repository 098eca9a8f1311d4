// Timestamp helpers.
// Event timestamps arrive in strict UTC form (YYYY-MM-DDTHH:MM:SSZ) and are
// shown as YYYY-MM-DD HH:MM:SS. Display formatting only, no zone shifting.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{OctofeedError, Result};

const EVENT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse an event timestamp in the exact API wire format.
pub fn parse_event_timestamp(input: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(input, EVENT_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| OctofeedError::Timestamp {
            input: input.to_string(),
        })
}

/// Render a timestamp in the fixed display format.
pub fn format_display(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(DISPLAY_FORMAT).to_string()
}
