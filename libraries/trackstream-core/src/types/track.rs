/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A catalog entry describing one audio file and its metadata.
///
/// Tracks are created by the catalog backend and flow into the playback core
/// read-only. `title`, `artist` and `category` are always present; every other
/// field may be absent and means "unknown", never a zero value. Field names
/// follow the catalog's JSON wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Backend identifier; absent for unsaved tracks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TrackId>,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Category tag, also used as the color-lookup key
    pub category: String,

    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Duration in whole seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,

    /// Cover image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,

    /// Audio file size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,

    /// Absolute or server-relative URL of the audio resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

impl Track {
    /// Create a new track with the required metadata only
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            artist: artist.into(),
            category: category.into(),
            description: None,
            duration: None,
            cover_image: None,
            file_size: None,
            file_url: None,
        }
    }

    /// Set the backend identifier
    pub fn with_id(mut self, id: TrackId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the duration in seconds
    pub fn with_duration(mut self, secs: u64) -> Self {
        self.duration = Some(secs);
        self
    }

    /// Set the cover image URL
    pub fn with_cover_image(mut self, url: impl Into<String>) -> Self {
        self.cover_image = Some(url.into());
        self
    }

    /// Set the file size in bytes
    pub fn with_file_size(mut self, bytes: u64) -> Self {
        self.file_size = Some(bytes);
        self
    }

    /// Set the audio resource URL
    pub fn with_file_url(mut self, url: impl Into<String>) -> Self {
        self.file_url = Some(url.into());
        self
    }

    /// Get the duration as a `Duration`, if known
    pub fn duration(&self) -> Option<Duration> {
        self.duration.map(Duration::from_secs)
    }

    /// Whether the track has a playable audio resource
    pub fn has_file_url(&self) -> bool {
        self.file_url.is_some()
    }
}
