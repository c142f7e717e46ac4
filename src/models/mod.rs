use serde::{Deserialize, Deserializer, Serialize};
use std::{convert::Infallible, fmt::Display, str::FromStr};

mod genre;
mod history;

pub use genre::Genre;
pub use history::{NewHistoryEntry, WatchHistoryEntry};

/// Catalog-assigned movie identifier
///
/// TMDB hands out integers, but ids travelling through history records may
/// arrive as strings, so both shapes are accepted. Integer text always
/// becomes `Numeric`, so `"550"` and `550` name the same movie.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum MovieId {
    Numeric(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for MovieId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Numeric(u64),
            Text(String),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Numeric(id) => MovieId::Numeric(id),
            Wire::Text(text) => MovieId::from_text(&text),
        })
    }
}

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovieId::Numeric(id) => write!(f, "{}", id),
            MovieId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl MovieId {
    /// Numeric when the text is an integer, opaque text otherwise
    pub fn from_text(s: &str) -> Self {
        match s.parse::<u64>() {
            Ok(id) => MovieId::Numeric(id),
            Err(_) => MovieId::Text(s.to_string()),
        }
    }

    /// Same id with integer text folded into `Numeric`
    pub fn canonical(&self) -> Self {
        match self {
            MovieId::Text(text) => MovieId::from_text(text),
            numeric => numeric.clone(),
        }
    }
}

impl FromStr for MovieId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(MovieId::from_text(s))
    }
}

impl From<u64> for MovieId {
    fn from(id: u64) -> Self {
        MovieId::Numeric(id)
    }
}

/// Canonical movie shape used everywhere past the catalog boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    pub poster_url: String,
    pub synopsis: String,
    pub year: Option<String>,
    pub genres: Vec<String>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// One page of movie results from `/discover/movie`, `/movie/popular` or `/search/movie`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<RawMovie>,
}

/// Raw movie object as returned by the catalog
///
/// List endpoints carry `genre_ids`; detail payloads carry `genres` objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMovie {
    pub id: MovieId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Option<Vec<u32>>,
    #[serde(default)]
    pub genres: Option<Vec<RawGenre>>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGenre {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
}

/// Filters for a catalog movie search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieSearch {
    pub query: Option<String>,
    pub genre: Option<Genre>,
    pub year: Option<u16>,
    pub min_rating: Option<f64>,
}

impl MovieSearch {
    /// Text query with surrounding whitespace removed, if any is left
    pub fn text_query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_id_display() {
        assert_eq!(MovieId::Numeric(550).to_string(), "550");
        assert_eq!(MovieId::Text("tt0137523".to_string()).to_string(), "tt0137523");
    }

    #[test]
    fn test_movie_id_from_str() {
        assert_eq!("550".parse::<MovieId>().unwrap(), MovieId::Numeric(550));
        assert_eq!(
            "abc-1".parse::<MovieId>().unwrap(),
            MovieId::Text("abc-1".to_string())
        );
    }

    #[test]
    fn test_movie_id_untagged_serde() {
        let numeric: MovieId = serde_json::from_str("603").unwrap();
        assert_eq!(numeric, MovieId::Numeric(603));
        assert_eq!(serde_json::to_string(&numeric).unwrap(), "603");

        let text: MovieId = serde_json::from_str("\"603x\"").unwrap();
        assert_eq!(text, MovieId::Text("603x".to_string()));
    }

    #[test]
    fn test_integer_text_id_deserializes_as_numeric() {
        let id: MovieId = serde_json::from_str("\"550\"").unwrap();
        assert_eq!(id, MovieId::Numeric(550));
        assert_eq!(serde_json::to_string(&id).unwrap(), "550");
    }

    #[test]
    fn test_canonical_folds_integer_text() {
        assert_eq!(MovieId::Text("550".to_string()).canonical(), MovieId::Numeric(550));
        assert_eq!(
            MovieId::Text("tt0137523".to_string()).canonical(),
            MovieId::Text("tt0137523".to_string())
        );
    }

    #[test]
    fn test_raw_movie_deserialization_list_shape() {
        let json = r#"{
            "id": 603,
            "title": "The Matrix",
            "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
            "overview": "Set in the 22nd century...",
            "release_date": "1999-03-30",
            "genre_ids": [28, 878],
            "vote_average": 8.2,
            "popularity": 81.3
        }"#;

        let raw: RawMovie = serde_json::from_str(json).unwrap();
        assert_eq!(raw.id, MovieId::Numeric(603));
        assert_eq!(raw.title.as_deref(), Some("The Matrix"));
        assert_eq!(raw.genre_ids, Some(vec![28, 878]));
        assert_eq!(raw.genres, None);
        assert_eq!(raw.vote_average, Some(8.2));
    }

    #[test]
    fn test_catalog_page_tolerates_missing_results() {
        let page: CatalogPage = serde_json::from_str(r#"{"page": 1}"#).unwrap();
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_text_query_trims() {
        let search = MovieSearch {
            query: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(search.text_query(), None);

        let search = MovieSearch {
            query: Some(" alien ".to_string()),
            ..Default::default()
        };
        assert_eq!(search.text_query(), Some("alien"));
    }
}
