//! Request and response types for the catalog API.

use serde::{Deserialize, Serialize};

/// Configuration for connecting to a catalog server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the catalog server, e.g. `http://localhost:8080`
    pub base_url: String,
}

impl CatalogConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// Query parameters for listing tracks.
///
/// `title` and `category` filter the listing when present; paging is
/// zero-based.
#[derive(Debug, Clone, Default)]
pub struct TrackQuery {
    pub title: Option<String>,
    pub category: Option<String>,
    pub page: u32,
    pub size: u32,
}

impl TrackQuery {
    /// Query for the given page with the default page size.
    pub fn page(page: u32) -> Self {
        Self {
            page,
            size: DEFAULT_PAGE_SIZE,
            ..Self::default()
        }
    }
}

/// Default number of tracks per page.
pub const DEFAULT_PAGE_SIZE: u32 = 8;

/// One page of a paginated listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_pages: u32,
    pub total_elements: u64,
}

/// Metadata for creating or updating a track.
///
/// The audio file itself travels as a separate multipart part.
#[derive(Debug, Clone, Default)]
pub struct TrackUpload {
    pub title: String,
    pub artist: String,
    pub category: String,
    pub description: Option<String>,
    pub duration: Option<u64>,
    pub cover_image: Option<String>,
}
