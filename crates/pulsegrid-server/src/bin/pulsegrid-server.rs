//! Pulsegrid telemetry server binary.
//!
//! Synthesizes (or loads) the sensor dataset and serves live dashboards.

use std::env;

use pulsegrid_core::{ReadingSource, SourceConfig, StreamConfig};
use pulsegrid_server::PulseServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Parse command line args: [port] [sensor_count | dataset.json]
    let args: Vec<String> = env::args().collect();

    let port: u16 = args.get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(3000);

    let source = match args.get(2) {
        Some(arg) if arg.ends_with(".json") => {
            let json = std::fs::read_to_string(arg)?;
            ReadingSource::from_json(&json)?
        }
        Some(arg) => {
            let sensor_count = arg.parse().unwrap_or(6);
            ReadingSource::synthesize(&SourceConfig {
                sensor_count,
                ..SourceConfig::default()
            })
        }
        None => ReadingSource::synthesize(&SourceConfig::default()),
    };

    let config = StreamConfig::default();

    println!("Pulsegrid Telemetry Server");
    println!("==========================");
    println!();
    println!("Sensors: {}", source.sensor_count());
    println!("Emission interval: {} ms", config.emit_interval_ms);
    println!();
    println!("Starting server on http://localhost:{}", port);
    println!("Connect a dashboard to ws://localhost:{}/ws?sensor=1", port);
    println!();

    // Start server
    let server = PulseServer::new(source, config);
    server.serve(port).await?;

    Ok(())
}
