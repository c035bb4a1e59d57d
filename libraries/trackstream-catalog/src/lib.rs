//! TrackStream Catalog Client
//!
//! HTTP client library for the track catalog REST API.
//!
//! # Features
//!
//! - **Listing**: Paginated track listing with title and category filters
//! - **CRUD**: Fetch, create, update, and delete tracks
//! - **Uploads**: Multipart upload of audio files and cover images
//!
//! # Example
//!
//! ```ignore
//! use trackstream_catalog::{CatalogClient, CatalogConfig, TrackQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CatalogConfig::new("http://localhost:8080");
//!     let client = CatalogClient::new(config)?;
//!
//!     let page = client.list_tracks(&TrackQuery::page(0)).await?;
//!     for track in &page.content {
//!         println!("{} - {}", track.artist, track.title);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

mod client;
mod error;
mod types;

pub use client::CatalogClient;
pub use error::{CatalogError, Result};
pub use types::{CatalogConfig, Page, TrackQuery, TrackUpload, DEFAULT_PAGE_SIZE};
