use crate::models::{Genre, MovieRecord, RawMovie};

/// Base URL prepended to catalog poster paths
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Poster used when the catalog has no artwork for a movie
pub const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/300x450";

/// Converts a raw catalog movie into the canonical `MovieRecord`
///
/// Pure: the same raw movie always yields the same record.
pub fn normalize(raw: &RawMovie) -> MovieRecord {
    MovieRecord {
        id: raw.id.clone(),
        title: raw
            .title
            .clone()
            .or_else(|| raw.original_title.clone())
            .unwrap_or_default(),
        poster_url: poster_url(raw.poster_path.as_deref()),
        synopsis: raw.overview.clone().unwrap_or_default(),
        year: release_year(raw.release_date.as_deref()),
        genres: genre_names(raw),
    }
}

pub fn normalize_all(raw: &[RawMovie]) -> Vec<MovieRecord> {
    raw.iter().map(normalize).collect()
}

fn poster_url(path: Option<&str>) -> String {
    match path.map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) => format!("{}{}", IMAGE_BASE_URL, path),
        None => PLACEHOLDER_POSTER_URL.to_string(),
    }
}

fn release_year(release_date: Option<&str>) -> Option<String> {
    release_date
        .filter(|date| !date.is_empty())
        .map(|date| date.chars().take(4).collect())
}

// List payloads carry bare ids, detail payloads carry {id, name} objects.
// Either way the id is authoritative and unknown ids are dropped.
fn genre_names(raw: &RawMovie) -> Vec<String> {
    let ids: Vec<u32> = match (&raw.genre_ids, &raw.genres) {
        (Some(ids), _) => ids.clone(),
        (None, Some(genres)) => genres.iter().map(|g| g.id).collect(),
        (None, None) => Vec::new(),
    };

    ids.into_iter()
        .filter_map(Genre::from_id)
        .map(|genre| genre.name().to_string())
        .collect()
}
