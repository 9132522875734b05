//! Axum web server: WebSocket streaming plus a small REST surface.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use pulsegrid_core::{Reading, ReadingSource, SensorId, StreamConfig};

use crate::registry::SessionRegistry;

/// Shared application state.
pub struct AppState {
    registry: SessionRegistry,
}

/// Telemetry streaming server.
pub struct PulseServer {
    state: Arc<AppState>,
}

impl PulseServer {
    /// Create a server over a loaded reading source.
    pub fn new(source: ReadingSource, config: StreamConfig) -> Self {
        let registry = SessionRegistry::new(Arc::new(source), config);
        Self {
            state: Arc::new(AppState { registry }),
        }
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            // Serve the dashboard page
            .route("/", get(index_handler))
            // API routes
            .route("/api/status", get(status_handler))
            .route("/api/sensors", get(sensors_handler))
            // WebSocket for the reading stream
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the server on the given port.
    pub async fn serve(self, port: u16) -> Result<(), std::io::Error> {
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Telemetry server running on http://localhost:{}", port);
        axum::serve(listener, self.router()).await
    }
}

/// Serve the embedded dashboard page.
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// Server status response.
#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    sensor_count: usize,
    active_sessions: usize,
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        sensor_count: state.registry.source().sensor_count(),
        active_sessions: state.registry.session_count().await,
    })
}

#[derive(Serialize)]
struct SensorEntry {
    id: u32,
    len: usize,
}

#[derive(Serialize)]
struct SensorsResponse {
    sensors: Vec<SensorEntry>,
    total: usize,
}

async fn sensors_handler(State(state): State<Arc<AppState>>) -> Json<SensorsResponse> {
    let source = state.registry.source();
    let sensors: Vec<SensorEntry> = (1..=source.sensor_count() as u32)
        .filter_map(|id| {
            source
                .series(SensorId(id))
                .ok()
                .map(|series| SensorEntry {
                    id,
                    len: series.len(),
                })
        })
        .collect();
    let total = sensors.len();
    Json(SensorsResponse { sensors, total })
}

#[derive(Deserialize)]
struct ConnectParams {
    sensor: Option<String>,
}

/// Frames pushed to the dashboard, tagged by event type.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsEvent {
    Reading(Reading),
}

/// Validate the sensor selector before upgrading; a missing, malformed or
/// out-of-range `?sensor=` is rejected with 400 rather than coerced.
async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<ConnectParams>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let selector = params.sensor.unwrap_or_default();
    match SensorId::parse(&selector).and_then(|sensor| state.registry.validate(sensor)) {
        Ok(sensor) => ws.on_upgrade(move |socket| handle_socket(socket, state, sensor)),
        Err(e) => {
            tracing::warn!(selector = %selector, error = %e, "rejected connection");
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>, sensor: SensorId) {
    let registry = &state.registry;
    let connection_id = registry.next_connection_id();

    let mut readings = match registry.connect(&connection_id, sensor).await {
        Ok(rx) => rx,
        Err(e) => {
            // Validated before upgrade, so only a teardown race lands here.
            tracing::warn!(connection = %connection_id, error = %e, "session start failed");
            let _ = socket.send(Message::Close(None)).await;
            return;
        }
    };

    loop {
        tokio::select! {
            reading = readings.recv() => {
                let Some(reading) = reading else { break };
                let json = match serde_json::to_string(&WsEvent::Reading(reading)) {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::error!(connection = %connection_id, error = %e, "encode failed");
                        break;
                    }
                };
                if socket.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!(connection = %connection_id, "dashboard disconnected");
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        tracing::error!(connection = %connection_id, error = %e, "websocket error");
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    // Immediate teardown, no drain. An emission racing this is dropped.
    registry.disconnect(&connection_id).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulsegrid_core::SourceConfig;

    fn server() -> PulseServer {
        let source = ReadingSource::synthesize(&SourceConfig::default());
        PulseServer::new(source, StreamConfig::default())
    }

    #[test]
    fn router_builds() {
        let _router = server().router();
    }

    #[test]
    fn reading_frame_is_tagged() {
        let json = serde_json::to_string(&WsEvent::Reading(Reading {
            timestamp: 1_700_000_000_000,
            value: 51.0,
            zscore: 0.0,
        }))
        .unwrap();
        assert!(json.contains(r#""type":"reading""#));
        assert!(json.contains(r#""value":51.0"#));
    }

    #[tokio::test]
    async fn status_reports_sensor_and_session_counts() {
        let server = server();
        let response = status_handler(State(server.state.clone())).await;
        assert_eq!(response.0.status, "ok");
        assert_eq!(response.0.sensor_count, SourceConfig::default().sensor_count);
        assert_eq!(response.0.active_sessions, 0);
    }

    #[tokio::test]
    async fn sensors_listing_covers_every_series() {
        let server = server();
        let response = sensors_handler(State(server.state.clone())).await;
        let config = SourceConfig::default();
        assert_eq!(response.0.total, config.sensor_count);
        assert_eq!(response.0.sensors[0].id, 1);
        assert!(response.0.sensors.iter().all(|s| s.len == config.series_len));
    }
}
