//! Pulsegrid core
//!
//! Shared data model for the pulsegrid telemetry stream:
//!
//! - **Reading**: one timestamped value + anomaly z-score
//! - **ReadingSource**: fixed table of per-sensor series, keyed 1..N
//! - **StreamConfig**: emission interval, buffer capacity, display widths
//! - **Error**: taxonomy shared by server and dashboard crates

mod config;
mod error;
mod reading;
mod source;

pub use config::StreamConfig;
pub use error::{Error, Result};
pub use reading::{epoch_ms, Reading, SensorId, SensorSeries};
pub use source::{ReadingSource, SourceConfig};
