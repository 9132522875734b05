//! The reading source: a fixed table of per-sensor series.
//!
//! Loaded once at process start and never mutated. Series are either
//! synthesized deterministically from a seeded configuration or parsed from
//! a JSON dataset keyed 1..N.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::reading::{SensorId, SensorSeries};

/// Configuration for deterministic dataset synthesis.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Seed for deterministic synthesis
    pub seed: u64,
    /// Number of sensors in the table
    pub sensor_count: usize,
    /// Points per series
    pub series_len: usize,
    /// Probability that a point carries a non-zero z-score
    pub spike_rate: f64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            sensor_count: 6,
            series_len: 120,
            spike_rate: 0.08,
        }
    }
}

/// Fixed, read-only table of sensor series, addressed by 1-based sensor id.
#[derive(Debug, Clone)]
pub struct ReadingSource {
    series: Vec<SensorSeries>,
}

impl ReadingSource {
    /// Synthesize a dataset from the given configuration.
    ///
    /// The same configuration always produces the same table.
    pub fn synthesize(config: &SourceConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let series = (0..config.sensor_count)
            .map(|_| {
                let baseline = rng.random_range(40.0..60.0);
                let amplitude = rng.random_range(5.0..15.0);
                let period = rng.random_range(12.0..32.0);

                let mut readings = Vec::with_capacity(config.series_len);
                let mut z_scores = Vec::with_capacity(config.series_len);
                for i in 0..config.series_len {
                    let noise: f64 = rng.random_range(-2.0..2.0);
                    readings.push(baseline + amplitude * (i as f64 * TAU / period).sin() + noise);
                    z_scores.push(if rng.random_bool(config.spike_rate) {
                        rng.random_range(2.0..4.0)
                    } else {
                        0.0
                    });
                }
                SensorSeries { readings, z_scores }
            })
            .collect();
        Self { series }
    }

    /// Parse a dataset from JSON: an array of `{ readings, zScores }`
    /// entries, implicitly keyed 1..N by position.
    pub fn from_json(json: &str) -> Result<Self> {
        let series: Vec<SensorSeries> = serde_json::from_str(json)?;
        Self::from_series(series)
    }

    /// Build a source from pre-constructed series, validating shape.
    pub fn from_series(series: Vec<SensorSeries>) -> Result<Self> {
        for (i, s) in series.iter().enumerate() {
            if s.is_empty() {
                return Err(Error::InvalidInput(format!("series {} is empty", i + 1)));
            }
            if s.readings.len() != s.z_scores.len() {
                return Err(Error::InvalidInput(format!(
                    "series {}: {} readings but {} z-scores",
                    i + 1,
                    s.readings.len(),
                    s.z_scores.len()
                )));
            }
        }
        Ok(Self { series })
    }

    /// Number of sensors in the table.
    pub fn sensor_count(&self) -> usize {
        self.series.len()
    }

    /// Look up the series for a sensor id, 1-indexed.
    pub fn series(&self, sensor: SensorId) -> Result<&SensorSeries> {
        self.series.get(sensor.index()).ok_or_else(|| {
            Error::InvalidSensor(format!(
                "sensor {} out of range (1..={})",
                sensor,
                self.series.len()
            ))
        })
    }
}
