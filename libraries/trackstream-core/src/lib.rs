//! TrackStream Core
//!
//! Platform-agnostic domain types and shared helpers for TrackStream.
//!
//! This crate provides the foundational building blocks used by the playback
//! and catalog crates:
//! - **Domain Types**: [`Track`], [`TrackId`]
//! - **Display Helpers**: duration / file-size formatting, category colors
//! - **Error Handling**: unified [`CoreError`] and [`Result`] types
//!
//! # Example
//!
//! ```rust
//! use trackstream_core::{Track, TrackId};
//!
//! let track = Track::new("My Favorite Song", "Some Artist", "pop")
//!     .with_id(TrackId::new(42))
//!     .with_file_url("/uploads/song.mp3");
//!
//! assert_eq!(track.id, Some(TrackId::new(42)));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod format;
pub mod types;

pub use error::{CoreError, Result};
pub use format::{category_color, format_duration, format_file_size};
pub use types::{Track, TrackId};
