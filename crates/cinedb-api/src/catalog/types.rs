//! Catalog result pages and upstream entity types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// --- Result page ---

/// Shaped, paginated result of a single catalog query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPage {
    /// Echo of the request's pattern.
    pub search: String,
    /// Page number the slice was taken for (clamped to >= 1).
    pub page: usize,
    /// Page size.
    pub per_page: usize,
    /// Item count after filtering, before pagination.
    pub total: usize,
    /// `ceil(total / per_page)`; `0` when the collection is empty.
    pub total_pages: usize,
    /// The page slice: at most `per_page` entities starting at offset
    /// `(page - 1) * per_page`.
    pub items: Vec<Value>,
}

// --- Upstream entities ---

/// A movie entity as returned by the upstream catalog.
///
/// Field coverage follows the upstream payload; fields the upstream
/// omits deserialize to `None` or an empty list, degradation to
/// placeholder text is left to presentation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Catalog identifier (e.g. `tt1375666`).
    pub id: String,
    /// Title.
    pub title: Option<String>,
    /// Title including release year.
    pub full_title: Option<String>,
    /// Release year.
    pub year: Option<String>,
    /// Primary image URL.
    pub image: Option<String>,
    /// Alternative poster URL (some endpoints use this field instead).
    pub poster_url: Option<String>,
    /// Human-readable runtime (e.g. `2h 28min`).
    pub runtime_str: Option<String>,
    /// Plot summary.
    pub plot: Option<String>,
    /// Awards summary.
    pub awards: Option<String>,
    /// Production countries.
    pub countries: Option<String>,
    /// Spoken languages.
    pub languages: Option<String>,
    /// Genres.
    #[serde(default)]
    pub genre_list: Vec<GenreTag>,
    /// Credited cast.
    #[serde(default)]
    pub actor_list: Vec<CastMember>,
    /// Credited directors.
    #[serde(default)]
    pub director_list: Vec<CastMember>,
    /// Box office figures.
    pub box_office: Option<BoxOffice>,
    /// Rating aggregates.
    pub ratings: Option<Ratings>,
}

/// A credited cast or crew member.
#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    /// Catalog identifier (e.g. `nm0000138`).
    pub id: Option<String>,
    /// Credited name.
    pub name: String,
}

/// A genre entry, which the upstream returns either as a `{key, value}`
/// object or as a bare string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GenreTag {
    /// Object form carrying the label in `value`.
    Entry {
        /// Genre label.
        value: String,
    },
    /// Bare string form.
    Bare(String),
}

impl GenreTag {
    /// The genre label, regardless of representation.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Entry { value } => value,
            Self::Bare(label) => label,
        }
    }
}

/// A credited person name from the name-search endpoint, which the
/// upstream returns either as a bare string or as an object carrying a
/// `name` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CreditedName {
    /// Object form carrying the name in `name`.
    Entry {
        /// Credited name.
        name: String,
    },
    /// Bare string form.
    Bare(String),
}

impl CreditedName {
    /// The credited name, regardless of representation.
    #[must_use]
    pub fn as_name(&self) -> &str {
        match self {
            Self::Entry { name } => name,
            Self::Bare(name) => name,
        }
    }

    /// Case-insensitive substring test against an already-lowercased
    /// pattern.
    #[must_use]
    pub fn matches(&self, lowered_pattern: &str) -> bool {
        self.as_name().to_lowercase().contains(lowered_pattern)
    }
}

/// Box office figures.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxOffice {
    /// Worldwide gross as a formatted currency string (e.g.
    /// `"$836,836,967"`).
    pub cumulative_worldwide_gross: Option<String>,
}

/// Rating aggregates.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ratings {
    /// IMDb score as a decimal string (upstream key `imDb`).
    pub im_db: Option<String>,
}

/// All reviews recorded for one movie.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewThread {
    /// Movie the thread belongs to.
    pub movie_id: String,
    /// Individual reviews.
    #[serde(default)]
    pub items: Vec<Review>,
}

/// A single user review.
#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    /// Reviewer user name.
    pub username: Option<String>,
    /// Review headline.
    pub title: Option<String>,
    /// Review body.
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_parse_movies_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/catalog/movies.json");

        // Act
        let movies: Vec<Movie> = serde_json::from_str(json).unwrap();

        // Assert
        assert!(!movies.is_empty());
        let inception = movies.iter().find(|m| m.id == "tt1375666").unwrap();
        assert_eq!(inception.title.as_deref(), Some("Inception"));
        assert_eq!(
            inception
                .box_office
                .as_ref()
                .unwrap()
                .cumulative_worldwide_gross
                .as_deref(),
            Some("$836,836,967")
        );
        assert!(
            inception
                .actor_list
                .iter()
                .any(|actor| actor.name == "Leonardo DiCaprio")
        );
    }

    #[test]
    fn test_parse_movie_without_box_office() {
        // Arrange
        let json = include_str!("../../../../fixtures/catalog/movies.json");

        // Act
        let movies: Vec<Movie> = serde_json::from_str(json).unwrap();

        // Assert: missing fields degrade to None, not a decode failure
        let shawshank = movies.iter().find(|m| m.id == "tt0111161").unwrap();
        assert!(shawshank.box_office.is_none());
        assert!(shawshank.poster_url.is_none());
    }

    #[test]
    fn test_parse_names_fixture_mixed_shapes() {
        // Arrange
        let json = include_str!("../../../../fixtures/catalog/names.json");

        // Act
        let names: Vec<CreditedName> = serde_json::from_str(json).unwrap();

        // Assert: both bare strings and `{name}` objects deserialize
        assert!(
            names
                .iter()
                .any(|name| matches!(name, CreditedName::Bare(_)))
        );
        assert!(
            names
                .iter()
                .any(|name| matches!(name, CreditedName::Entry { .. }))
        );
        assert!(names.iter().any(|name| name.as_name() == "Tom Hanks"));
    }

    #[test]
    fn test_credited_name_matches_case_insensitively() {
        // Arrange
        let name: CreditedName = serde_json::from_str(r#"{"name":"Tom Hanks"}"#).unwrap();

        // Act & Assert
        assert!(name.matches("hanks"));
        assert!(!name.matches("hardy"));
    }

    #[test]
    fn test_genre_tag_both_shapes() {
        // Arrange & Act
        let tags: Vec<GenreTag> =
            serde_json::from_str(r#"[{"key":"1","value":"Action"},"Sci-Fi"]"#).unwrap();

        // Assert
        assert_eq!(tags[0].label(), "Action");
        assert_eq!(tags[1].label(), "Sci-Fi");
    }

    #[test]
    fn test_parse_reviews_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/catalog/reviews.json");

        // Act
        let threads: Vec<ReviewThread> = serde_json::from_str(json).unwrap();

        // Assert
        let thread = threads
            .iter()
            .find(|thread| thread.movie_id == "tt1375666")
            .unwrap();
        assert!(!thread.items.is_empty());
        assert!(thread.items[0].username.is_some());
    }

    #[test]
    fn test_ratings_im_db_key() {
        // Arrange & Act
        let ratings: Ratings = serde_json::from_str(r#"{"imDb":"8.8"}"#).unwrap();

        // Assert
        assert_eq!(ratings.im_db.as_deref(), Some("8.8"));
    }
}
