//! The external movie catalog (TMDB): record types, display helpers, the HTTP
//! client and the debounced search controller.

mod client;
mod search;
mod service;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use client::TmdbClient;
pub use service::CatalogService;
pub use search::{
    LookupReply, LookupTracker, SearchController, SearchReply, SearchRequest, SEARCH_FAILED_MESSAGE,
};

/// Base URL for poster thumbnails
pub const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w185";

/// Immutable record returned by the catalog search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    /// TMDB omits, blanks or nulls this for unreleased titles
    #[serde(default, deserialize_with = "null_as_empty")]
    pub release_date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub overview: String,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
}

impl CatalogItem {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            release_date: String::new(),
            overview: String::new(),
            vote_average: 0.0,
            genre_ids: Vec::new(),
        }
    }

    /// Full poster URL, if the record has a poster
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| format!("{POSTER_BASE}{path}"))
    }

    /// Release year, or "N/A" when the date is missing or too short
    pub fn year(&self) -> &str {
        self.release_date.get(..4).unwrap_or("N/A")
    }

    /// "★ 7.3" for rated titles
    pub fn rating_label(&self) -> Option<String> {
        (self.vote_average > 0.0).then(|| format!("★ {:.1}", self.vote_average))
    }

    /// Up to two genre names joined with a middle dot. Unknown ids are skipped.
    pub fn genre_label(&self, genres: &HashMap<u64, String>) -> String {
        self.genre_ids
            .iter()
            .take(2)
            .filter_map(|id| genres.get(id).map(String::as_str))
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A named genre from the catalog's genre list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Format a runtime in minutes. Zero means the catalog has no data.
pub fn format_runtime(minutes: u32) -> String {
    if minutes == 0 {
        "N/A".to_owned()
    } else {
        format!("{}h {}m", minutes / 60, minutes % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_helpers() {
        let mut item = CatalogItem::new(603, "The Matrix");
        assert_eq!(item.year(), "N/A");
        assert_eq!(item.rating_label(), None);
        assert_eq!(item.poster_url(), None);

        item.release_date = "1999-03-31".to_owned();
        item.vote_average = 8.216;
        item.poster_path = Some("/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg".to_owned());
        assert_eq!(item.year(), "1999");
        assert_eq!(item.rating_label().as_deref(), Some("★ 8.2"));
        assert_eq!(
            item.poster_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w185/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg")
        );
    }

    #[test]
    fn genre_label_takes_first_two_known() {
        let genres = HashMap::from([
            (28, "Action".to_owned()),
            (878, "Science Fiction".to_owned()),
            (53, "Thriller".to_owned()),
        ]);
        let mut item = CatalogItem::new(1, "x");
        item.genre_ids = vec![28, 878, 53];
        assert_eq!(item.genre_label(&genres), "Action · Science Fiction");

        item.genre_ids = vec![999, 53];
        assert_eq!(item.genre_label(&genres), "Thriller");
    }

    #[test]
    fn runtime_format() {
        assert_eq!(format_runtime(0), "N/A");
        assert_eq!(format_runtime(45), "0h 45m");
        assert_eq!(format_runtime(136), "2h 16m");
    }

    #[test]
    fn deserializes_sparse_tmdb_record() {
        let json = r#"{"id": 7, "title": "Untitled", "poster_path": null, "overview": null, "vote_average": 0}"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 7);
        assert!(item.release_date.is_empty());
        assert!(item.overview.is_empty());
        assert!(item.genre_ids.is_empty());
    }
}
