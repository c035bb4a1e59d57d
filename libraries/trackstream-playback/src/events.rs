//! Playback events
//!
//! Event-based communication for UI synchronization. The controller
//! accumulates events and the host drains them with
//! [`PlaybackController::take_events`]; the `Error` variant is how playback
//! failures reach the surface that presents them to the user.
//!
//! [`PlaybackController::take_events`]: crate::PlaybackController::take_events

use crate::types::TransportState;
use serde::{Deserialize, Serialize};
use trackstream_core::TrackId;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Transport state changed
    StateChanged {
        /// The new transport state
        state: TransportState,
    },

    /// The current track changed
    TrackChanged {
        /// Id of the new current track, if it has one
        track_id: Option<TrackId>,
        /// Title of the new current track
        title: String,
        /// Artist of the new current track
        artist: String,
    },

    /// The current track finished playing naturally
    TrackFinished,

    /// A playback failure was absorbed
    Error {
        /// Human-readable failure description
        message: String,
    },
}
