//! Dashboard-side session state machine.

use serde::{Deserialize, Serialize};

use pulsegrid_core::StreamConfig;

use crate::projector::ViewProjection;
use crate::transport::TransportEvent;
use crate::window::WindowBuffer;

/// Display state of one dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayState {
    /// No data yet, or channel closed cleanly
    Disconnected,
    /// Readings are arriving
    Streaming,
    /// A transport error fired; buffered data was cleared
    Error,
}

/// Derived connection status, for the status line of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub connected: bool,
    pub last_error: Option<String>,
    pub last_timestamp: Option<i64>,
}

/// One dashboard instance: buffer plus display state, fed by transport
/// events. Event handling is synchronous; there are no concurrent writers.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    config: StreamConfig,
    buffer: WindowBuffer,
    state: DisplayState,
    last_error: Option<String>,
}

impl DashboardClient {
    pub fn new(config: StreamConfig) -> Self {
        let buffer = WindowBuffer::new(config.buffer_capacity);
        Self {
            config,
            buffer,
            state: DisplayState::Disconnected,
            last_error: None,
        }
    }

    /// Apply one transport event.
    ///
    /// A reading flips the dashboard into streaming and appends to the
    /// window. Any transport error clears the buffer and records the
    /// message atomically with the state change; stale data is never left
    /// visible under an error state. A clean close just disconnects.
    pub fn on_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Reading(reading) => {
                self.buffer = self.buffer.append(reading);
                self.state = DisplayState::Streaming;
                self.last_error = None;
            }
            event @ TransportEvent::Error { .. } => {
                self.buffer = self.buffer.cleared();
                self.state = DisplayState::Error;
                self.last_error = event.as_error().map(|e| e.to_string());
            }
            TransportEvent::Closed => {
                self.state = DisplayState::Disconnected;
            }
        }
    }

    /// Reset for a fresh connect. Nothing survives a reconnect: the server
    /// starts a new session at cursor 0 and the window starts empty.
    pub fn reset(&mut self) {
        self.buffer = self.buffer.cleared();
        self.state = DisplayState::Disconnected;
        self.last_error = None;
    }

    /// Project the view at the requested width, clamped to the configured
    /// maximum so the projection never truncates against the buffer.
    pub fn projection(&self, width: usize) -> ViewProjection {
        ViewProjection::project(&self.buffer, width.min(self.config.max_display_width))
    }

    /// Project at the default display width.
    pub fn default_projection(&self) -> ViewProjection {
        self.projection(self.config.default_display_width)
    }

    pub fn state(&self) -> DisplayState {
        self.state
    }

    pub fn buffer(&self) -> &WindowBuffer {
        &self.buffer
    }

    pub fn status(&self) -> ConnectionStatus {
        ConnectionStatus {
            connected: self.state == DisplayState::Streaming,
            last_error: self.last_error.clone(),
            last_timestamp: self.buffer.last_timestamp(),
        }
    }
}
