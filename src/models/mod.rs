use serde::Deserialize;

pub mod movie;
pub mod report;

pub use movie::{CreditSet, MovieSummary, MovieYear, Person};
pub use report::{
    Axes, Axis, Connection, ConnectionType, DnaReport, OriginalMovie, RecommendedMovie,
    Recommendations,
};

/// TMDB movie identifier
pub type MovieId = u64;

/// TMDB person identifier
pub type PersonId = u64;

/// TMDB genre identifier
pub type GenreId = u64;

// ============================================================================
// TMDB API Types
// ============================================================================

/// A movie as it appears in TMDB list endpoints (search, discover, similar)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TmdbMovie {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    /// `YYYY-MM-DD`, sometimes an empty string for unreleased titles
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
}

/// Paged list response. Error payloads carry `status_message` instead of results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbPage {
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
    #[serde(default)]
    pub status_message: Option<String>,
}

/// Response from `GET /movie/{id}?append_to_response=credits`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TmdbMovieDetails {
    #[serde(flatten)]
    pub movie: TmdbMovie,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub credits: TmdbCredits,
}

impl TmdbMovieDetails {
    pub fn genre_ids(&self) -> Vec<GenreId> {
        self.genres.iter().map(|g| g.id).collect()
    }

    pub fn genre_names(&self) -> Vec<String> {
        self.genres.iter().map(|g| g.name.clone()).collect()
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TmdbGenre {
    pub id: GenreId,
    pub name: String,
}

/// Credits sub-resource, cast in billing order
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TmdbCastMember {
    pub id: PersonId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TmdbCrewMember {
    pub id: PersonId,
    pub name: String,
    pub job: String,
}
