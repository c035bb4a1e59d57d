//! Audio output capability
//!
//! Abstracts the single audio output behind traits so the controller can run
//! against any host (browser audio element, native backend, test double).
//! Opening a resource is inherently asynchronous: the factory returns a
//! handle immediately, and the host delivers readiness and terminal signals
//! later as [`OutputSignal`]s tagged with the generation the handle was
//! opened under.

use crate::error::Result;
use std::time::Duration;

/// The single audio output handle.
///
/// Exclusively owned and mutated by the playback controller; no other
/// component may construct or hold one.
pub trait AudioOutput {
    /// Begin playback after the host has confirmed the resource is ready.
    ///
    /// Only valid once the `Ready` signal for this handle's generation has
    /// arrived.
    fn start(&mut self) -> Result<()>;

    /// Pause playback, keeping the position
    fn pause(&mut self) -> Result<()>;

    /// Resume a paused (or naturally ended) output
    fn resume(&mut self) -> Result<()>;

    /// Stop playback and release the underlying resource
    fn stop(&mut self);

    /// Seek to a position in the current resource
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Set output volume, 0.0 to 1.0
    fn set_volume(&mut self, volume: f32);

    /// Current playing position
    fn position(&self) -> Duration;
}

/// Creates output handles for audio resource URLs.
///
/// `open` begins loading and returns the handle; it does not wait for the
/// resource to buffer. The host must later deliver an [`OutputSignal`] with
/// the same `generation` to report readiness or failure.
pub trait OutputFactory {
    /// Begin loading `url`, associating all future signals with `generation`
    fn open(&mut self, url: &str, generation: u64) -> Result<Box<dyn AudioOutput>>;
}

/// Asynchronous signal from the audio output, delivered by the host event
/// loop to [`PlaybackController::handle_output_signal`].
///
/// Every signal carries the generation of the handle it refers to, so
/// confirmations for a no-longer-current resource can be discarded.
///
/// [`PlaybackController::handle_output_signal`]: crate::PlaybackController::handle_output_signal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSignal {
    /// The resource buffered enough data to start
    Ready {
        /// Generation of the handle this signal refers to
        generation: u64,
    },

    /// The track reached its natural end
    Ended {
        /// Generation of the handle this signal refers to
        generation: u64,
    },

    /// The resource could not be fetched, decoded or started
    Failed {
        /// Generation of the handle this signal refers to
        generation: u64,
        /// Human-readable failure description
        message: String,
    },
}

impl OutputSignal {
    /// The generation this signal refers to
    pub fn generation(&self) -> u64 {
        match self {
            Self::Ready { generation }
            | Self::Ended { generation }
            | Self::Failed { generation, .. } => *generation,
        }
    }
}
