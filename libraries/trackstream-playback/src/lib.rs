//! TrackStream - Playback Coordination
//!
//! Shares one logical "now playing" state and one audio output between any
//! number of independently mounted views, without any of them owning a shared
//! memory location.
//!
//! This crate provides:
//! - [`PlaybackBus`]: two typed notification channels ("play intent" and
//!   "list snapshot") with explicit subscription tokens
//! - [`PlaybackController`]: the authoritative track list / index / transport
//!   state and the single audio output handle
//! - [`FooterPlayer`]: the controller attached to the bus for the lifetime of
//!   the footer region
//! - [`TrackListView`]: the adapter transient views use to forward play
//!   intent
//! - [`AudioOutput`] / [`OutputFactory`]: the host-provided output capability
//!
//! # Architecture
//!
//! Everything is single-threaded and event-driven: state changes only in
//! reaction to user input, bus broadcasts, and output signals delivered
//! sequentially by the host's event loop. A view that wants a track played
//! never addresses the player; it broadcasts on the bus, and whichever
//! footer region is mounted reacts. Starting audio is asynchronous, so every
//! selection mints a generation and stale output confirmations are dropped:
//! the latest selection always wins.
//!
//! # Example
//!
//! ```rust
//! use trackstream_playback::{
//!     AudioOutput, FooterPlayer, OutputFactory, OutputSignal, PlaybackBus, PlayerConfig,
//!     Result, TrackListView, TransportState,
//! };
//! use trackstream_core::{Track, TrackId};
//! use std::time::Duration;
//!
//! // Host-provided audio output (a real host would wrap an audio element
//! // or native backend)
//! struct SilentOutput;
//!
//! impl AudioOutput for SilentOutput {
//!     fn start(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) -> Result<()> { Ok(()) }
//!     fn resume(&mut self) -> Result<()> { Ok(()) }
//!     fn stop(&mut self) {}
//!     fn seek(&mut self, _position: Duration) -> Result<()> { Ok(()) }
//!     fn set_volume(&mut self, _volume: f32) {}
//!     fn position(&self) -> Duration { Duration::ZERO }
//! }
//!
//! struct SilentFactory;
//!
//! impl OutputFactory for SilentFactory {
//!     fn open(&mut self, _url: &str, _generation: u64) -> Result<Box<dyn AudioOutput>> {
//!         Ok(Box::new(SilentOutput))
//!     }
//! }
//!
//! let bus = PlaybackBus::new();
//! let player = FooterPlayer::attach(&bus, Box::new(SilentFactory), PlayerConfig::default());
//!
//! // A list view selects a track; the footer reacts through the bus
//! let mut list = TrackListView::new(bus.clone());
//! list.set_tracks(vec![
//!     Track::new("Song", "Artist", "pop")
//!         .with_id(TrackId::new(1))
//!         .with_file_url("http://example.com/song.mp3"),
//! ]);
//! let track = list.tracks()[0].clone();
//! list.select_track(&track);
//!
//! assert_eq!(player.controller().transport_state(), TransportState::Loading);
//!
//! // The host reports the resource ready; playback starts
//! player.handle_output_signal(&OutputSignal::Ready { generation: 1 });
//! assert_eq!(player.controller().transport_state(), TransportState::Playing);
//! ```

#![forbid(unsafe_code)]

mod bus;
mod controller;
mod error;
mod events;
mod output;
mod player;
pub mod types;
mod view;

// Public exports
pub use bus::{PlaybackBus, Subscription};
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use output::{AudioOutput, OutputFactory, OutputSignal};
pub use player::FooterPlayer;
pub use types::{NavDirection, PlayerConfig, TrackListUpdate, TransportState};
pub use view::TrackListView;
