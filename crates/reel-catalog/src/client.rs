//! TMDB HTTP client

use async_trait::async_trait;
use reel_core::CatalogItem;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::{CatalogLookup, LookupError};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Response envelope shared by the TMDB list endpoints
#[derive(Debug, Deserialize)]
struct PageResponse {
    results: Vec<CatalogItem>,
}

/// Poster sizes the image CDN serves
#[derive(Debug, Clone, Copy)]
pub enum PosterSize {
    W92,
    W200,
    W500,
}

impl PosterSize {
    fn as_str(self) -> &'static str {
        match self {
            PosterSize::W92 => "w92",
            PosterSize::W200 => "w200",
            PosterSize::W500 => "w500",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum TrendingWindow {
    Day,
    Week,
}

impl TrendingWindow {
    fn as_str(self) -> &'static str {
        match self {
            TrendingWindow::Day => "day",
            TrendingWindow::Week => "week",
        }
    }
}

pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    image_base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        image_base_url: impl Into<String>,
    ) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("reel/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            image_base_url: image_base_url.into(),
            api_key: api_key.into(),
        })
    }

    pub fn with_defaults(api_key: impl Into<String>) -> Result<Self, LookupError> {
        Self::new(api_key, DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL)
    }

    async fn fetch_page(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<CatalogItem>, LookupError> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "catalog request rejected");
            return Err(LookupError::Status(status.as_u16()));
        }

        let page: PageResponse = response.json().await?;
        Ok(page.results)
    }

    pub async fn popular(&self, page: u32) -> Result<Vec<CatalogItem>, LookupError> {
        self.fetch_page("movie/popular", &[("page", &page.to_string())])
            .await
    }

    pub async fn trending(&self, window: TrendingWindow) -> Result<Vec<CatalogItem>, LookupError> {
        self.fetch_page(&format!("trending/movie/{}", window.as_str()), &[])
            .await
    }

    /// Full CDN URL for a poster path, `None` when the catalog has no poster
    pub fn poster_url(&self, path: Option<&str>, size: PosterSize) -> Option<String> {
        path.map(|p| format!("{}/{}{}", self.image_base_url, size.as_str(), p))
    }
}

#[async_trait]
impl CatalogLookup for TmdbClient {
    async fn search(
        &self,
        query: &str,
        cancel: CancellationToken,
    ) -> Result<Vec<CatalogItem>, LookupError> {
        let params = [("query", query)];
        tokio::select! {
            _ = cancel.cancelled() => Err(LookupError::Cancelled),
            result = self.fetch_page("search/movie", &params) => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_response_wire_format() {
        let json = r#"{
            "page": 1,
            "results": [
                {"id": 603, "title": "The Matrix", "poster_path": "/m.jpg",
                 "release_date": "1999-03-31", "vote_average": 8.2},
                {"id": 9, "title": "Unreleased", "poster_path": null}
            ],
            "total_pages": 1,
            "total_results": 2
        }"#;
        let page: PageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].title, "The Matrix");
        assert!(page.results[1].release_date.is_empty());
    }

    #[test]
    fn test_poster_url() {
        let client = TmdbClient::with_defaults("k").unwrap();
        assert_eq!(
            client.poster_url(Some("/abc.jpg"), PosterSize::W92).as_deref(),
            Some("https://image.tmdb.org/t/p/w92/abc.jpg")
        );
        assert_eq!(client.poster_url(None, PosterSize::W500), None);
    }
}
