use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{CatalogItem, Genre};
use crate::error::{CatalogError, CatalogResult};

#[derive(Deserialize)]
struct SearchPage {
    #[serde(default)]
    results: Vec<CatalogItem>,
}

#[derive(Deserialize)]
struct GenreList {
    #[serde(default)]
    genres: Vec<Genre>,
}

#[derive(Deserialize)]
struct MovieDetails {
    #[serde(default)]
    runtime: Option<u32>,
}

/// Read-only client for the TMDB v3 API
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// First page of movies matching `query`, truncated to `limit`
    pub async fn search(&self, query: &str, limit: usize) -> CatalogResult<Vec<CatalogItem>> {
        let page: SearchPage = self
            .get_json("/search/movie", &[("query", query), ("page", "1")])
            .await?;
        let mut results = page.results;
        results.truncate(limit);
        Ok(results)
    }

    pub async fn genres(&self) -> CatalogResult<Vec<Genre>> {
        let list: GenreList = self.get_json("/genre/movie/list", &[]).await?;
        Ok(list.genres)
    }

    /// Runtime in minutes; `Some(0)` when TMDB has no runtime on record
    pub async fn runtime(&self, movie_id: u64) -> CatalogResult<Option<u32>> {
        let details: MovieDetails = self.get_json(&format!("/movie/{movie_id}"), &[]).await?;
        Ok(details.runtime)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> CatalogResult<T> {
        if !self.has_api_key() {
            return Err(CatalogError::MissingApiKey);
        }
        let url = format!("{}{path}", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", "en-US")])
            .query(params)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(CatalogError::Status { status, body })
        }
    }
}
