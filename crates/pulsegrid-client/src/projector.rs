//! Projection of the window buffer into the rendered view.

use serde::{Deserialize, Serialize};

use pulsegrid_core::Reading;

use crate::window::WindowBuffer;

/// One point of the secondary (anomaly) series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SecondaryPoint {
    pub timestamp: i64,
    pub value: f64,
}

/// What the rendering collaborator draws: the visible window, the highest
/// value in it, and the anomaly series normalized against that highest.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewProjection {
    pub visible: Vec<Reading>,
    pub highest: f64,
    pub secondary: Vec<SecondaryPoint>,
}

impl ViewProjection {
    /// Project the last `width` points of the buffer.
    ///
    /// Callers must keep `width <= buffer.capacity()`; a larger width simply
    /// yields the whole buffer. The secondary series is a peak indicator:
    /// a non-zero z-score maps to the window's highest value, zero stays at
    /// zero. The z-score magnitude itself is not drawn.
    pub fn project(buffer: &WindowBuffer, width: usize) -> Self {
        let points = buffer.points();
        let start = points.len().saturating_sub(width);
        let visible: Vec<Reading> = points[start..].to_vec();

        // Seed from the first value, not 0.0: an all-negative window still
        // reports its true maximum.
        let highest = if visible.is_empty() {
            0.0
        } else {
            visible
                .iter()
                .map(|r| r.value)
                .fold(f64::NEG_INFINITY, f64::max)
        };

        let secondary = visible
            .iter()
            .map(|r| SecondaryPoint {
                timestamp: r.timestamp,
                value: if r.zscore != 0.0 { highest } else { 0.0 },
            })
            .collect();

        Self {
            visible,
            highest,
            secondary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(n: i64, value: f64, zscore: f64) -> Reading {
        Reading {
            timestamp: n,
            value,
            zscore,
        }
    }

    fn filled_buffer(count: usize) -> WindowBuffer {
        let mut buffer = WindowBuffer::new(50);
        for n in 0..count {
            buffer = buffer.append(reading(n as i64, n as f64, 0.0));
        }
        buffer
    }

    #[test]
    fn projects_last_width_points_in_order() {
        let buffer = filled_buffer(50);
        let projection = ViewProjection::project(&buffer, 20);

        assert_eq!(projection.visible.len(), 20);
        let timestamps: Vec<i64> = projection.visible.iter().map(|r| r.timestamp).collect();
        assert_eq!(timestamps, (30..50).collect::<Vec<_>>());
    }

    #[test]
    fn highest_is_true_max_of_visible_window() {
        let buffer = filled_buffer(50);
        let projection = ViewProjection::project(&buffer, 20);
        // Values 30..49 are visible; 49 is both the last and the largest.
        assert_eq!(projection.highest, 49.0);

        // Points outside the window must not contribute.
        let narrower = ViewProjection::project(&buffer, 5);
        assert_eq!(narrower.highest, 49.0);
        assert_eq!(narrower.visible.len(), 5);
    }

    #[test]
    fn highest_of_all_negative_window_is_true_maximum() {
        let buffer = WindowBuffer::new(50)
            .append(reading(1, -5.0, 0.0))
            .append(reading(2, -2.0, 2.5))
            .append(reading(3, -8.0, 0.0));
        let projection = ViewProjection::project(&buffer, 20);

        assert_eq!(projection.highest, -2.0);
        // The peak indicator normalizes against that maximum, too.
        let values: Vec<f64> = projection.secondary.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![0.0, -2.0, 0.0]);
    }

    #[test]
    fn partial_buffer_projects_fewer_points() {
        let buffer = filled_buffer(7);
        let projection = ViewProjection::project(&buffer, 20);
        assert_eq!(projection.visible.len(), 7);
        assert_eq!(projection.highest, 6.0);
    }

    #[test]
    fn secondary_is_peak_indicator_not_magnitude() {
        let buffer = WindowBuffer::new(50)
            .append(reading(1, 10.0, 0.0))
            .append(reading(2, 30.0, 2.5))
            .append(reading(3, 20.0, 0.0));
        let projection = ViewProjection::project(&buffer, 20);

        assert_eq!(projection.highest, 30.0);
        let values: Vec<f64> = projection.secondary.iter().map(|p| p.value).collect();
        // Non-zero z-score maps to the highest value, not to 2.5.
        assert_eq!(values, vec![0.0, 30.0, 0.0]);
        assert_eq!(projection.secondary[1].timestamp, 2);
    }

    #[test]
    fn empty_buffer_projects_empty_view() {
        let buffer = WindowBuffer::new(50);
        let projection = ViewProjection::project(&buffer, 20);
        assert!(projection.visible.is_empty());
        assert!(projection.secondary.is_empty());
        assert_eq!(projection.highest, 0.0);
    }
}
