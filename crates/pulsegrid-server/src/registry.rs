//! Session registry: one session, one timer, per live connection.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use pulsegrid_core::{Reading, ReadingSource, Result, SensorId, StreamConfig};

use crate::stream::emit_loop;

/// Server-side binding between one connection and one sensor's cursor.
///
/// Owned exclusively by the registry; the cursor is advanced only by the
/// session's own emission task.
struct Session {
    sensor: SensorId,
    cursor: usize,
    task: JoinHandle<()>,
}

struct RegistryInner {
    source: Arc<ReadingSource>,
    config: StreamConfig,
    sessions: Mutex<HashMap<String, Session>>,
    next_conn: AtomicU64,
}

/// Process-wide map from connection id to session state.
///
/// Owns the lifecycle of emission timers: `connect` spawns exactly one
/// periodic task per session and `disconnect` aborts it. Create and destroy
/// for a connection id are serialized by the session lock. The registry is
/// a cheap cloneable handle over shared state.
#[derive(Clone)]
pub struct SessionRegistry {
    inner: Arc<RegistryInner>,
}

impl SessionRegistry {
    pub fn new(source: Arc<ReadingSource>, config: StreamConfig) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                source,
                config,
                sessions: Mutex::new(HashMap::new()),
                next_conn: AtomicU64::new(1),
            }),
        }
    }

    /// A fresh connection id, never reused for the process lifetime.
    pub fn next_connection_id(&self) -> String {
        format!("conn-{}", self.inner.next_conn.fetch_add(1, Ordering::Relaxed))
    }

    /// Check a sensor id against the loaded dataset.
    pub fn validate(&self, sensor: SensorId) -> Result<SensorId> {
        self.inner.source.series(sensor).map(|_| sensor)
    }

    /// Bind a connection to a sensor and start its emission timer.
    ///
    /// Fails with `Error::InvalidSensor` if the sensor is out of range.
    /// Readings arrive on the returned channel, one per interval, in strict
    /// cyclic order starting at cursor 0. A repeated connect for a live
    /// connection id tears the old session down first, so a session never
    /// runs two timers.
    pub async fn connect(
        &self,
        connection_id: &str,
        sensor: SensorId,
    ) -> Result<mpsc::Receiver<Reading>> {
        self.inner.source.series(sensor)?;

        let (tx, rx) = mpsc::channel(8);
        let mut sessions = self.inner.sessions.lock().await;
        if let Some(old) = sessions.remove(connection_id) {
            tracing::warn!(connection = %connection_id, "replacing live session");
            old.task.abort();
        }
        let task = tokio::spawn(emit_loop(self.clone(), connection_id.to_string(), tx));
        sessions.insert(
            connection_id.to_string(),
            Session {
                sensor,
                cursor: 0,
                task,
            },
        );
        tracing::info!(connection = %connection_id, %sensor, "session started");
        Ok(rx)
    }

    /// Stop the emission timer and drop the session.
    ///
    /// Idempotent: disconnecting an unknown id is a no-op.
    pub async fn disconnect(&self, connection_id: &str) {
        let mut sessions = self.inner.sessions.lock().await;
        if let Some(session) = sessions.remove(connection_id) {
            session.task.abort();
            tracing::info!(connection = %connection_id, "session removed");
        }
    }

    /// Produce the next reading for a session and advance its cursor.
    ///
    /// Returns `None` when the session no longer exists — the emission that
    /// raced a disconnect is dropped, not raised.
    pub(crate) async fn next_reading(&self, connection_id: &str) -> Option<Reading> {
        let mut sessions = self.inner.sessions.lock().await;
        let session = sessions.get_mut(connection_id)?;
        let series = match self.inner.source.series(session.sensor) {
            Ok(series) if !series.is_empty() => series,
            Ok(_) => return None,
            Err(e) => {
                tracing::error!(connection = %connection_id, error = %e, "series lookup failed");
                return None;
            }
        };
        let reading = series.reading_at(session.cursor);
        session.cursor = (session.cursor + 1) % series.len();
        Some(reading)
    }

    /// Cursor position of a live session, if any.
    pub async fn cursor(&self, connection_id: &str) -> Option<usize> {
        let sessions = self.inner.sessions.lock().await;
        sessions.get(connection_id).map(|s| s.cursor)
    }

    /// Number of live sessions.
    pub async fn session_count(&self) -> usize {
        self.inner.sessions.lock().await.len()
    }

    pub fn source(&self) -> &ReadingSource {
        &self.inner.source
    }

    pub fn config(&self) -> &StreamConfig {
        &self.inner.config
    }
}
