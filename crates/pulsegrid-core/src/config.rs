//! Streaming configuration.

/// Configuration for the streaming pipeline.
///
/// These were fixed constants in earlier revisions; they are grouped here so
/// server and dashboard agree on one set of values.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Interval between emissions for one session, in milliseconds
    pub emit_interval_ms: u64,
    /// Sliding window capacity on the dashboard side, in points
    pub buffer_capacity: usize,
    /// Display width used when the caller does not request one
    pub default_display_width: usize,
    /// Largest display width a caller should request
    pub max_display_width: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            emit_interval_ms: 2000,
            buffer_capacity: 50,
            default_display_width: 20,
            max_display_width: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_display_width_within_capacity() {
        let config = StreamConfig::default();
        assert_eq!(config.emit_interval_ms, 2000);
        assert_eq!(config.buffer_capacity, 50);
        assert!(config.default_display_width <= config.max_display_width);
        assert!(config.max_display_width <= config.buffer_capacity);
    }
}
