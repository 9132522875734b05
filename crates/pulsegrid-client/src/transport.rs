//! Transport contract between one server session and one dashboard.
//!
//! The wire itself (WebSocket, in the reference deployment) is a
//! collaborator; the dashboard only sees the events defined here. Delivery
//! is in-order and at-most-once; a reconnect starts a fresh session with a
//! fresh cursor, no continuity is offered.

use serde::{Deserialize, Serialize};

use pulsegrid_core::{Error, Reading};

/// The named transport error events, all handled uniformly: any of them
/// puts the dashboard into the error state and clears buffered data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportErrorKind {
    ReconnectError,
    ConnectError,
    ConnectTimeout,
    ConnectFailed,
    Error,
}

impl TransportErrorKind {
    /// Map a transport event name to its kind.
    pub fn from_event_name(name: &str) -> Option<Self> {
        match name {
            "reconnect_error" => Some(Self::ReconnectError),
            "connect_error" => Some(Self::ConnectError),
            "connect_timeout" => Some(Self::ConnectTimeout),
            "connect_failed" => Some(Self::ConnectFailed),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReconnectError => "reconnect_error",
            Self::ConnectError => "connect_error",
            Self::ConnectTimeout => "connect_timeout",
            Self::ConnectFailed => "connect_failed",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Events delivered to the dashboard by the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// One reading, server to client
    Reading(Reading),
    /// Any of the named socket errors
    Error {
        kind: TransportErrorKind,
        message: String,
    },
    /// Clean close of the channel
    Closed,
}

/// Wire frame as sent by the server, tagged by event type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireFrame {
    Reading(Reading),
}

impl TransportEvent {
    /// Decode a server text frame into an event. Unknown frames are `None`.
    pub fn from_frame(text: &str) -> Option<TransportEvent> {
        match serde_json::from_str::<WireFrame>(text) {
            Ok(WireFrame::Reading(reading)) => Some(TransportEvent::Reading(reading)),
            Err(_) => None,
        }
    }

    /// The taxonomy error for an error event, `None` for anything else.
    pub fn as_error(&self) -> Option<Error> {
        match self {
            TransportEvent::Error { kind, message } => {
                Some(Error::Transport(format!("{kind}: {message}")))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_map_event_names() {
        for name in [
            "reconnect_error",
            "connect_error",
            "connect_timeout",
            "connect_failed",
            "error",
        ] {
            let kind = TransportErrorKind::from_event_name(name).unwrap();
            assert_eq!(kind.as_str(), name);
        }
        assert!(TransportErrorKind::from_event_name("ping").is_none());
    }

    #[test]
    fn reading_frame_decodes() {
        let frame = r#"{"type":"reading","timestamp":1700000000000,"value":51.0,"zscore":0.0}"#;
        match TransportEvent::from_frame(frame) {
            Some(TransportEvent::Reading(r)) => {
                assert_eq!(r.timestamp, 1_700_000_000_000);
                assert_eq!(r.value, 51.0);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn error_event_maps_to_taxonomy_error() {
        let event = TransportEvent::Error {
            kind: TransportErrorKind::ConnectTimeout,
            message: "no response".to_string(),
        };
        let err = event.as_error().unwrap();
        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(
            err.to_string(),
            "Transport error: connect_timeout: no response"
        );
        assert!(TransportEvent::Closed.as_error().is_none());
    }

    #[test]
    fn unknown_frame_ignored() {
        assert!(TransportEvent::from_frame(r#"{"type":"heartbeat"}"#).is_none());
        assert!(TransportEvent::from_frame("not json").is_none());
    }
}
