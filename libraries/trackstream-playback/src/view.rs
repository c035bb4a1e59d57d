//! Track source view adapter
//!
//! The adapter any track-presenting view (list page, details page) uses to
//! forward play intent onto the bus. Views are stateless with respect to
//! playback: they know which tracks exist and keep only an optimistic
//! highlight of "the track currently deemed playing" for display. The
//! authoritative transport state lives in the playback controller.

use crate::bus::PlaybackBus;
use trackstream_core::{Track, TrackId};

/// A searchable track list (or any other transient view) feeding the bus.
pub struct TrackListView {
    bus: PlaybackBus,
    tracks: Vec<Track>,
    now_playing: Option<TrackId>,
}

impl TrackListView {
    /// Create an empty view publishing onto `bus`
    pub fn new(bus: PlaybackBus) -> Self {
        Self {
            bus,
            tracks: Vec::new(),
            now_playing: None,
        }
    }

    /// Replace the view's track list (e.g. after a page load or search)
    pub fn set_tracks(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
    }

    /// The view's current ordered track list
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Select a track: broadcast the play intent and the full list snapshot.
    ///
    /// Selecting the track that is already highlighted clears the highlight
    /// instead of re-requesting play; this is a display nuance, not a
    /// playback command.
    pub fn select_track(&mut self, track: &Track) {
        if track.id.is_some() && self.now_playing == track.id {
            self.now_playing = None;
            return;
        }
        self.now_playing = track.id;

        self.bus.request_play(track);
        let index = match track.id {
            Some(id) => self
                .tracks
                .iter()
                .position(|t| t.id == Some(id))
                .map_or(-1, |i| i as isize),
            None => -1,
        };
        self.bus.publish_list(&self.tracks, index);
    }

    /// Id of the track this view optimistically highlights as playing
    pub fn now_playing(&self) -> Option<TrackId> {
        self.now_playing
    }

    /// Whether `id` is the highlighted track
    pub fn is_track_playing(&self, id: TrackId) -> bool {
        self.now_playing == Some(id)
    }
}
