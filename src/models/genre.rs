use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Closed table of catalog movie genres.
///
/// Every genre name and TMDB genre id used by the service comes from this enum;
/// names or ids outside it are treated as unknown and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Genre {
    Action,
    Adventure,
    Animation,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Family,
    Fantasy,
    History,
    Horror,
    Music,
    Mystery,
    Romance,
    ScienceFiction,
    TvMovie,
    Thriller,
    War,
    Western,
}

impl Genre {
    pub const ALL: [Genre; 19] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Animation,
        Genre::Comedy,
        Genre::Crime,
        Genre::Documentary,
        Genre::Drama,
        Genre::Family,
        Genre::Fantasy,
        Genre::History,
        Genre::Horror,
        Genre::Music,
        Genre::Mystery,
        Genre::Romance,
        Genre::ScienceFiction,
        Genre::TvMovie,
        Genre::Thriller,
        Genre::War,
        Genre::Western,
    ];

    /// TMDB genre id
    pub const fn id(self) -> u32 {
        match self {
            Genre::Action => 28,
            Genre::Adventure => 12,
            Genre::Animation => 16,
            Genre::Comedy => 35,
            Genre::Crime => 80,
            Genre::Documentary => 99,
            Genre::Drama => 18,
            Genre::Family => 10751,
            Genre::Fantasy => 14,
            Genre::History => 36,
            Genre::Horror => 27,
            Genre::Music => 10402,
            Genre::Mystery => 9648,
            Genre::Romance => 10749,
            Genre::ScienceFiction => 878,
            Genre::TvMovie => 10770,
            Genre::Thriller => 53,
            Genre::War => 10752,
            Genre::Western => 37,
        }
    }

    /// Display name, as stored on watch history entries
    pub const fn name(self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Animation => "Animation",
            Genre::Comedy => "Comedy",
            Genre::Crime => "Crime",
            Genre::Documentary => "Documentary",
            Genre::Drama => "Drama",
            Genre::Family => "Family",
            Genre::Fantasy => "Fantasy",
            Genre::History => "History",
            Genre::Horror => "Horror",
            Genre::Music => "Music",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::ScienceFiction => "Science Fiction",
            Genre::TvMovie => "TV Movie",
            Genre::Thriller => "Thriller",
            Genre::War => "War",
            Genre::Western => "Western",
        }
    }

    /// Exact-match lookup by display name
    pub fn from_name(name: &str) -> Option<Genre> {
        Self::ALL.iter().copied().find(|genre| genre.name() == name)
    }

    /// Case-insensitive lookup, used for user-typed search filters
    pub fn from_name_ignore_case(name: &str) -> Option<Genre> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|genre| genre.name().eq_ignore_ascii_case(name))
    }

    pub fn from_id(id: u32) -> Option<Genre> {
        Self::ALL.iter().copied().find(|genre| genre.id() == id)
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for Genre {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Genre::from_name(&value).ok_or_else(|| format!("unknown genre: {}", value))
    }
}

impl From<Genre> for String {
    fn from(genre: Genre) -> Self {
        genre.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_is_bijective() {
        let ids: HashSet<u32> = Genre::ALL.iter().map(|g| g.id()).collect();
        let names: HashSet<&str> = Genre::ALL.iter().map(|g| g.name()).collect();
        assert_eq!(ids.len(), Genre::ALL.len());
        assert_eq!(names.len(), Genre::ALL.len());

        for genre in Genre::ALL {
            assert_eq!(Genre::from_id(genre.id()), Some(genre));
            assert_eq!(Genre::from_name(genre.name()), Some(genre));
        }
    }

    #[test]
    fn test_known_ids() {
        assert_eq!(Genre::from_id(28), Some(Genre::Action));
        assert_eq!(Genre::from_id(878), Some(Genre::ScienceFiction));
        assert_eq!(Genre::from_id(10770), Some(Genre::TvMovie));
        assert_eq!(Genre::from_id(1), None);
    }

    #[test]
    fn test_name_lookup_is_exact() {
        assert_eq!(Genre::from_name("Science Fiction"), Some(Genre::ScienceFiction));
        assert_eq!(Genre::from_name("science fiction"), None);
        assert_eq!(Genre::from_name("Sci-Fi"), None);
    }

    #[test]
    fn test_name_lookup_ignore_case() {
        assert_eq!(
            Genre::from_name_ignore_case(" science fiction "),
            Some(Genre::ScienceFiction)
        );
        assert_eq!(Genre::from_name_ignore_case("HORROR"), Some(Genre::Horror));
        assert_eq!(Genre::from_name_ignore_case("Anime"), None);
    }

    #[test]
    fn test_serde_uses_display_name() {
        let json = serde_json::to_string(&Genre::TvMovie).unwrap();
        assert_eq!(json, "\"TV Movie\"");

        let genre: Genre = serde_json::from_str("\"Western\"").unwrap();
        assert_eq!(genre, Genre::Western);

        assert!(serde_json::from_str::<Genre>("\"Polka\"").is_err());
    }
}
