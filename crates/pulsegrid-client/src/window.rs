//! Bounded sliding window over received readings.

use pulsegrid_core::Reading;

/// Ordered, bounded buffer of the most recently received readings.
///
/// Append never exceeds `capacity`: the oldest points are evicted first.
/// Ordering is insertion order, which matches arrival order and therefore
/// non-decreasing timestamps. `append` returns a new buffer rather than
/// mutating in place, so a projected window never aliases live state.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowBuffer {
    points: Vec<Reading>,
    capacity: usize,
}

impl WindowBuffer {
    /// Create an empty buffer with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            points: Vec::new(),
            capacity,
        }
    }

    /// The buffer extended by one reading, trimmed from the front to fit.
    pub fn append(&self, reading: Reading) -> Self {
        let mut points = self.points.clone();
        points.push(reading);
        let overflow = points.len().saturating_sub(self.capacity);
        if overflow > 0 {
            points.drain(..overflow);
        }
        Self {
            points,
            capacity: self.capacity,
        }
    }

    /// An empty buffer with the same capacity.
    pub fn cleared(&self) -> Self {
        Self::new(self.capacity)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn points(&self) -> &[Reading] {
        &self.points
    }

    /// Timestamp of the most recent reading, if any.
    pub fn last_timestamp(&self) -> Option<i64> {
        self.points.last().map(|r| r.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(n: i64) -> Reading {
        Reading {
            timestamp: n,
            value: n as f64,
            zscore: 0.0,
        }
    }

    #[test]
    fn append_grows_until_capacity() {
        let mut buffer = WindowBuffer::new(3);
        for n in 0..3 {
            buffer = buffer.append(reading(n));
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.points()[0].timestamp, 0);
    }

    #[test]
    fn overflow_evicts_oldest_first() {
        let mut buffer = WindowBuffer::new(50);
        for n in 1..=51 {
            buffer = buffer.append(reading(n));
        }
        // After 51 appends the buffer holds appends #2..#51 in arrival order.
        assert_eq!(buffer.len(), 50);
        assert_eq!(buffer.points()[0].timestamp, 2);
        assert_eq!(buffer.points()[49].timestamp, 51);
        let timestamps: Vec<i64> = buffer.points().iter().map(|r| r.timestamp).collect();
        assert_eq!(timestamps, (2..=51).collect::<Vec<_>>());
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut buffer = WindowBuffer::new(5);
        for n in 0..200 {
            buffer = buffer.append(reading(n));
            assert!(buffer.len() <= 5);
        }
        assert_eq!(buffer.points()[0].timestamp, 195);
    }

    #[test]
    fn append_does_not_alias_previous_buffer() {
        let a = WindowBuffer::new(3).append(reading(1));
        let b = a.append(reading(2));
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn cleared_keeps_capacity() {
        let buffer = WindowBuffer::new(4).append(reading(1)).append(reading(2));
        let cleared = buffer.cleared();
        assert!(cleared.is_empty());
        assert_eq!(cleared.capacity(), 4);
        assert_eq!(cleared.last_timestamp(), None);
    }
}
