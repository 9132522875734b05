//! Per-session emission loop.

use std::time::Duration;

use tokio::sync::mpsc;

use pulsegrid_core::Reading;

use crate::registry::SessionRegistry;

/// Periodic emission task for one session.
///
/// Every interval: look up the session, build the reading at its cursor,
/// advance the cursor modulo the series length, and push the reading to the
/// one connection owning the session. Runs until the session is removed or
/// the receiving side goes away; a tick that finds the session already gone
/// is dropped silently. A failure here never touches any other session.
pub(crate) async fn emit_loop(
    registry: SessionRegistry,
    connection_id: String,
    tx: mpsc::Sender<Reading>,
) {
    let mut interval =
        tokio::time::interval(Duration::from_millis(registry.config().emit_interval_ms));
    // The first tick of a tokio interval completes immediately; consume it
    // so the first emission lands one full interval after connect.
    interval.tick().await;

    loop {
        interval.tick().await;
        let Some(reading) = registry.next_reading(&connection_id).await else {
            tracing::debug!(connection = %connection_id, "emission after teardown dropped");
            break;
        };
        if tx.send(reading).await.is_err() {
            tracing::debug!(connection = %connection_id, "receiver gone, stopping emission");
            break;
        }
    }
}
