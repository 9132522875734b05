//! Pulsegrid telemetry server
//!
//! Streams per-sensor readings to live dashboards over WebSocket.
//!
//! # Architecture
//!
//! - **SessionRegistry**: map from connection id to session; owns the
//!   emission timers, one per live connection
//! - **Emission loop**: per-session periodic task, one reading per
//!   interval, cursor wrapping modulo the series length
//! - **WebSocket**: `/ws?sensor=<id>` binds the connection to a sensor;
//!   invalid selectors are rejected before the upgrade
//! - **REST API**: server status and the sensor listing
//!
//! # Usage
//!
//! ```ignore
//! let source = ReadingSource::synthesize(&SourceConfig::default());
//! let server = PulseServer::new(source, StreamConfig::default());
//! server.serve(3000).await?;
//! ```

mod registry;
mod server;
mod stream;

pub use registry::SessionRegistry;
pub use server::PulseServer;
