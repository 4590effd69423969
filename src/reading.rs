//! The sensor reading data type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single analog sensor reading.
///
/// Immutable once created; a reading has no identity beyond its position in
/// the stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// When the reading was taken
    pub time: DateTime<Utc>,
    /// The raw sensor value
    pub value: f64,
}

impl Reading {
    /// Create a reading stamped with the current time.
    pub fn now(value: f64) -> Self {
        Self {
            time: Utc::now(),
            value,
        }
    }

    /// The reading's timestamp as whole Unix seconds.
    pub fn unix_seconds(&self) -> f64 {
        self.time.timestamp() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_reading_serialization() {
        let reading = Reading {
            time: Utc.with_ymd_and_hms(2016, 3, 1, 12, 0, 0).unwrap(),
            value: 512.0,
        };

        let json = serde_json::to_string(&reading).unwrap();
        assert!(json.contains("512"));

        let back: Reading = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reading);
    }

    #[test]
    fn test_unix_seconds() {
        let reading = Reading {
            time: Utc.timestamp_opt(1456833600, 0).unwrap(),
            value: 1.0,
        };
        assert_eq!(reading.unix_seconds(), 1456833600.0);
    }
}
