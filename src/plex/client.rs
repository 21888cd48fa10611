use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::plex::types::{
    Envelope, LibrarySection, MediaItem, MetadataContainer, PosterCandidate, PostersContainer,
    SectionsContainer,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {path} failed: {source}")]
    Http {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected status {status} from {path}")]
    Status { path: String, status: StatusCode },

    #[error("library section not found: {0}")]
    SectionNotFound(String),

    #[error("no metadata returned for {0}")]
    EmptyResponse(String),
}

/// Client for the Plex server HTTP API.
///
/// Authenticates every request with the `X-Plex-Token` header and asks for
/// JSON payloads. One instance is reused for every call in a run.
pub struct PlexClient {
    client: Client,
    base_url: String,
    token: String,
}

impl PlexClient {
    /// Build a client for the given server.
    ///
    /// `verify_tls = false` disables certificate validation for the whole
    /// connection, matching servers that run with self-signed certificates.
    pub fn new(url: &str, token: &str, verify_tls: bool, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(!verify_tls)
            .build()
            .map_err(Error::Client)?;

        Ok(Self {
            client,
            base_url: url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_container<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        debug!("GET {}", path);
        let response = self
            .client
            .get(self.url(path))
            .header("X-Plex-Token", &self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| Error::Http {
                path: path.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(Error::Status {
                path: path.to_string(),
                status: response.status(),
            });
        }

        let envelope: Envelope<T> = response.json().await.map_err(|source| Error::Http {
            path: path.to_string(),
            source,
        })?;

        Ok(envelope.container)
    }

    /// Verify the server is reachable and the token is accepted.
    pub async fn check_connection(&self) -> Result<(), Error> {
        let response = self
            .client
            .get(self.url("/"))
            .header("X-Plex-Token", &self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| Error::Http {
                path: "/".to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(Error::Status {
                path: "/".to_string(),
                status: response.status(),
            });
        }

        Ok(())
    }

    /// Fetch a single item by its rating key.
    pub async fn fetch_item(&self, rating_key: u64) -> Result<MediaItem, Error> {
        let path = format!("/library/metadata/{}", rating_key);
        let container: MetadataContainer = self.get_container(&path).await?;

        container
            .metadata
            .into_iter()
            .next()
            .ok_or(Error::EmptyResponse(path))
    }

    /// Resolve a library section by its exact title.
    pub async fn section_by_name(&self, name: &str) -> Result<LibrarySection, Error> {
        let container: SectionsContainer = self.get_container("/library/sections").await?;

        container
            .directories
            .into_iter()
            .find(|d| d.title == name)
            .ok_or_else(|| Error::SectionNotFound(name.to_string()))
    }

    /// Enumerate every item in a library section, in server order.
    pub async fn section_items(&self, section: &LibrarySection) -> Result<Vec<MediaItem>, Error> {
        let path = format!("/library/sections/{}/all", section.key);
        let container: MetadataContainer = self.get_container(&path).await?;
        Ok(container.metadata)
    }

    /// List the available poster candidates for an item, in server order.
    pub async fn posters(&self, item: &MediaItem) -> Result<Vec<PosterCandidate>, Error> {
        let path = format!("/library/metadata/{}/posters", item.rating_key);
        let container: PostersContainer = self.get_container(&path).await?;
        Ok(container.posters)
    }

    /// Make the given candidate the item's selected poster.
    pub async fn select_poster(
        &self,
        item: &MediaItem,
        candidate: &PosterCandidate,
    ) -> Result<(), Error> {
        let path = format!("/library/metadata/{}/poster", item.rating_key);
        debug!("PUT {} url={}", path, candidate.rating_key);
        let response = self
            .client
            .put(self.url(&path))
            .header("X-Plex-Token", &self.token)
            .query(&[("url", candidate.rating_key.as_str())])
            .send()
            .await
            .map_err(|source| Error::Http {
                path: path.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(Error::Status {
                path,
                status: response.status(),
            });
        }

        Ok(())
    }
}
