//! Pulsegrid dashboard client
//!
//! Receives a stream of readings for one sensor and maintains what a live
//! chart needs:
//!
//! - **WindowBuffer**: bounded sliding window, oldest evicted first
//! - **ViewProjection**: visible window + normalized anomaly series
//! - **DashboardClient**: display state machine fed by transport events
//!
//! The wire transport is a collaborator; the dashboard consumes
//! [`TransportEvent`]s and is otherwise independent of socket mechanics.
//! Rendering is likewise external: it receives an ordered sequence of
//! points from [`ViewProjection`] and draws it.

mod dashboard;
mod projector;
mod transport;
mod window;

pub use dashboard::{ConnectionStatus, DashboardClient, DisplayState};
pub use projector::{SecondaryPoint, ViewProjection};
pub use transport::{TransportErrorKind, TransportEvent};
pub use window::WindowBuffer;
