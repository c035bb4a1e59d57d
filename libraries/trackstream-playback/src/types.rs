//! Core types for playback coordination

use serde::{Deserialize, Serialize};
use std::time::Duration;
use trackstream_core::Track;

/// Transport state of the single audio output.
///
/// One explicit enum instead of `show_player`/`is_playing` booleans, so
/// impossible combinations cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportState {
    /// No audio loaded
    Idle,

    /// Track selected, output not yet confirmed ready
    Loading,

    /// Playing audio
    Playing,

    /// Paused mid-track
    Paused,
}

/// Snapshot broadcast on the list channel.
///
/// `current_index` is the position of the current track in `tracks`;
/// `-1` means "no current track" or "current track not in this list".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackListUpdate {
    /// Ordered track list known to the publisher
    pub tracks: Vec<Track>,

    /// Index of the current track, `-1` if unknown
    pub current_index: isize,
}

/// Direction of a navigation press, for the transient button highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavDirection {
    /// Previous-track button
    Previous,

    /// Next-track button
    Next,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// How long a navigation press stays visually active (default: 200ms)
    pub nav_flash: Duration,

    /// Initial volume (0-100, default: 100)
    pub volume: u8,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            nav_flash: Duration::from_millis(200),
            volume: 100,
        }
    }
}
