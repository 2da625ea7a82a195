//! Opaque identifiers and string-sortable timestamps.

use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};

/// 160 bits of OS randomness.
const ID_BYTES: usize = 20;

/// Timestamps are compared lexicographically, so the format must stay
/// fixed-width and UTC.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Generates a 40-character lowercase hex token.
pub fn new_id() -> Result<String> {
    let mut bytes = [0u8; ID_BYTES];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| AppError::Internal(format!("id generation failed: {e}")))?;
    Ok(hex::encode(bytes))
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn id_has_expected_length_and_charset() {
        let id = new_id().unwrap();
        assert_eq!(id.len(), ID_BYTES * 2);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(id, new_id().unwrap());
    }

    #[test]
    fn timestamps_sort_chronologically() {
        let early = Utc.with_ymd_and_hms(2023, 9, 30, 23, 59, 59).unwrap();
        let late = Utc.with_ymd_and_hms(2023, 10, 1, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(early), "2023-09-30T23:59:59Z");
        assert!(format_timestamp(early) < format_timestamp(late));
    }
}
