//! Catalog domain model

use serde::{Deserialize, Serialize};

/// A movie as returned by the catalog search API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Empty for records the catalog has no date for
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
}

/// Release year for display, `None` when the date is missing or malformed
pub fn movie_year(release_date: &str) -> Option<&str> {
    let year = release_date.get(..4)?;
    if year.chars().all(|c| c.is_ascii_digit()) {
        Some(year)
    } else {
        None
    }
}
