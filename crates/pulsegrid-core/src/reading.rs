//! Readings, sensor series and sensor identifiers.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A sensor identifier. Sensor ids are 1-based: id `k` addresses the
/// `k-1`-th series in the reading source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SensorId(pub u32);

impl SensorId {
    /// Parse a sensor selector as received at the connection boundary.
    ///
    /// Rejects anything that is not a positive integer. Range checking
    /// against the loaded dataset happens in the reading source.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().parse::<u32>() {
            Ok(n) if n >= 1 => Ok(SensorId(n)),
            Ok(_) => Err(Error::InvalidSensor(
                "sensor id must be >= 1".to_string(),
            )),
            Err(_) => Err(Error::InvalidSensor(format!(
                "sensor id must be a positive integer, got {raw:?}"
            ))),
        }
    }

    /// Zero-based index into the reading source.
    pub fn index(&self) -> usize {
        self.0 as usize - 1
    }
}

impl std::fmt::Display for SensorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single emitted reading. Immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Emission time, epoch milliseconds
    pub timestamp: i64,
    /// Sensor value at the cursor
    pub value: f64,
    /// Anomaly z-score paired with the value
    pub zscore: f64,
}

/// One sensor's pre-loaded value and z-score sequences.
///
/// Both sequences have the same length and are indexed by a shared cursor.
/// Read-only for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorSeries {
    pub readings: Vec<f64>,
    #[serde(rename = "zScores")]
    pub z_scores: Vec<f64>,
}

impl SensorSeries {
    /// Number of points in the series.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Build the reading at the given cursor, stamped with the current time.
    pub fn reading_at(&self, cursor: usize) -> Reading {
        Reading {
            timestamp: epoch_ms(),
            value: self.readings[cursor],
            zscore: self.z_scores[cursor],
        }
    }
}

/// Current time as epoch milliseconds.
pub fn epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
