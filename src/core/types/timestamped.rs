//! Generic timestamp wrapper.

use serde::{Deserialize, Serialize};

/// Generic timestamp wrapper for any data type.
///
/// Timestamps are in microseconds since epoch, matching the upstream
/// detector and particle-filter message stamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timestamped<T> {
    /// The wrapped data
    pub data: T,
    /// Timestamp in microseconds since epoch
    pub timestamp_us: u64,
}

impl<T> Timestamped<T> {
    /// Create a new timestamped value.
    #[inline]
    pub fn new(data: T, timestamp_us: u64) -> Self {
        Self { data, timestamp_us }
    }

    /// Absolute gap to another timestamp, in seconds.
    #[inline]
    pub fn gap_seconds(&self, other_timestamp_us: u64) -> f64 {
        self.timestamp_us.abs_diff(other_timestamp_us) as f64 * 1e-6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_carries_data_and_stamp() {
        let t = Timestamped::new(vec![1, 2, 3], 1_000_000);
        assert_eq!(t.data.len(), 3);
        assert_eq!(t.timestamp_us, 1_000_000);
    }

    #[test]
    fn test_gap_seconds_is_symmetric() {
        let t = Timestamped::new((), 2_000_000);
        assert_eq!(t.gap_seconds(1_500_000), 0.5);
        let earlier = Timestamped::new((), 1_500_000);
        assert_eq!(earlier.gap_seconds(2_000_000), 0.5);
    }
}
