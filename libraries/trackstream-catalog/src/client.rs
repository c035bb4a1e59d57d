//! HTTP client for the track catalog API.

use crate::error::{CatalogError, Result};
use crate::types::{CatalogConfig, Page, TrackQuery, TrackUpload};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::debug;
use trackstream_core::{Track, TrackId};
use url::Url;

/// Client for the track catalog REST API.
///
/// # Example
///
/// ```ignore
/// use trackstream_catalog::{CatalogClient, CatalogConfig, TrackQuery};
///
/// let config = CatalogConfig::new("http://localhost:8080");
/// let client = CatalogClient::new(config)?;
///
/// let page = client.list_tracks(&TrackQuery::page(0)).await?;
/// println!("{} tracks total", page.total_elements);
/// ```
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(CatalogError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url)
            .map_err(|e| CatalogError::InvalidUrl(format!("{base_url}: {e}")))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(CatalogError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("TrackStream/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CatalogError::Request)?;

        Ok(Self { http, base_url })
    }

    /// Get the normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List tracks, optionally filtered by title and category.
    pub async fn list_tracks(&self, query: &TrackQuery) -> Result<Page<Track>> {
        let url = self.tracks_url();

        let mut params: Vec<(&str, String)> = vec![
            ("page", query.page.to_string()),
            ("size", query.size.to_string()),
        ];
        if let Some(title) = &query.title {
            params.push(("title", title.clone()));
        }
        if let Some(category) = &query.category {
            params.push(("category", category.clone()));
        }

        debug!(url = %url, page = query.page, "Listing tracks");

        let response = self.http.get(&url).query(&params).send().await?;
        Self::parse_json(response, "track page").await
    }

    /// Fetch a single track by id.
    pub async fn get_track(&self, id: TrackId) -> Result<Track> {
        let url = format!("{}/{id}", self.tracks_url());

        debug!(url = %url, "Fetching track");

        let response = self.http.get(&url).send().await?;
        Self::parse_json(response, "track").await
    }

    /// Create a track from metadata plus an audio file.
    pub async fn create_track(
        &self,
        upload: &TrackUpload,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Track> {
        let url = self.tracks_url();
        let form = Self::metadata_form(upload).part(
            "file",
            Part::bytes(bytes).file_name(file_name.to_string()),
        );

        debug!(url = %url, title = %upload.title, "Creating track");

        let response = self.http.post(&url).multipart(form).send().await?;
        Self::parse_json(response, "created track").await
    }

    /// Update a track's metadata, optionally replacing its audio file.
    pub async fn update_track(
        &self,
        id: TrackId,
        upload: &TrackUpload,
        file: Option<(String, Vec<u8>)>,
    ) -> Result<Track> {
        let url = format!("{}/{id}", self.tracks_url());
        let mut form = Self::metadata_form(upload);
        if let Some((file_name, bytes)) = file {
            form = form.part("file", Part::bytes(bytes).file_name(file_name));
        }

        debug!(url = %url, "Updating track");

        let response = self.http.put(&url).multipart(form).send().await?;
        Self::parse_json(response, "updated track").await
    }

    /// Delete a track by id.
    pub async fn delete_track(&self, id: TrackId) -> Result<()> {
        let url = format!("{}/{id}", self.tracks_url());

        debug!(url = %url, "Deleting track");

        let response = self.http.delete(&url).send().await?;
        let status = response.status();
        if status.is_success() || status == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            Err(Self::server_error(response).await)
        }
    }

    /// Resolve a track's file URL against the catalog base URL.
    ///
    /// Absolute URLs pass through unchanged; server-relative paths are
    /// joined onto the base.
    pub fn resolve_file_url(&self, file_url: &str) -> String {
        if file_url.starts_with("http://") || file_url.starts_with("https://") {
            file_url.to_string()
        } else if file_url.starts_with('/') {
            format!("{}{file_url}", self.base_url)
        } else {
            format!("{}/{file_url}", self.base_url)
        }
    }

    fn tracks_url(&self) -> String {
        format!("{}/api/tracks", self.base_url)
    }

    fn metadata_form(upload: &TrackUpload) -> Form {
        let mut form = Form::new()
            .text("title", upload.title.clone())
            .text("artist", upload.artist.clone())
            .text("category", upload.category.clone());
        if let Some(description) = &upload.description {
            form = form.text("description", description.clone());
        }
        if let Some(duration) = upload.duration {
            form = form.text("duration", duration.to_string());
        }
        if let Some(cover_image) = &upload.cover_image {
            form = form.text("coverImage", cover_image.clone());
        }
        form
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(
        response: Response,
        what: &str,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| CatalogError::Parse(format!("Failed to parse {what}: {e}")))
        } else {
            Err(Self::server_error(response).await)
        }
    }

    async fn server_error(response: Response) -> CatalogError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        CatalogError::Server { status, message }
    }
}
