use serde::{Serialize, Serializer};
use std::fmt::Display;

use super::{MovieId, PersonId, TmdbCastMember, TmdbCrewMember, TmdbMovie};

/// Display value for a credit the provider did not list
pub const UNKNOWN_CREDIT: &str = "Unknown";

/// Release year of a movie, serialized as a number or the string `"unknown"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MovieYear {
    Known(i32),
    Unknown,
}

impl MovieYear {
    /// Derives the year from the leading four digits of a `YYYY-MM-DD` date
    pub fn from_release_date(release_date: Option<&str>) -> Self {
        release_date
            .and_then(|date| date.get(..4))
            .filter(|year| year.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|year| year.parse().ok())
            .map(MovieYear::Known)
            .unwrap_or(MovieYear::Unknown)
    }

    pub fn known(self) -> Option<i32> {
        match self {
            MovieYear::Known(year) => Some(year),
            MovieYear::Unknown => None,
        }
    }
}

impl Display for MovieYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovieYear::Known(year) => write!(f, "{}", year),
            MovieYear::Unknown => write!(f, "unknown"),
        }
    }
}

impl Serialize for MovieYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MovieYear::Known(year) => serializer.serialize_i32(*year),
            MovieYear::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

/// Movie as presented to clients
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    pub year: MovieYear,
    pub overview: String,
    pub poster_url: Option<String>,
    pub rating: f64,
    pub vote_count: u64,
}

impl MovieSummary {
    /// Formats a raw TMDB movie, resolving the poster path against `image_base_url`
    pub fn from_tmdb(movie: &TmdbMovie, image_base_url: &str) -> Self {
        let poster_url = movie
            .poster_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| format!("{}{}", image_base_url.trim_end_matches('/'), path));

        Self {
            id: movie.id,
            title: movie.title.clone(),
            year: MovieYear::from_release_date(movie.release_date.as_deref()),
            overview: movie.overview.clone().unwrap_or_default(),
            poster_url,
            rating: movie.vote_average,
            vote_count: movie.vote_count,
        }
    }
}

/// A credited person. The id is TMDB's and is only used as a lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub job: String,
}

impl From<&TmdbCrewMember> for Person {
    fn from(member: &TmdbCrewMember) -> Self {
        Self {
            id: member.id,
            name: member.name.clone(),
            job: member.job.clone(),
        }
    }
}

impl From<&TmdbCastMember> for Person {
    fn from(member: &TmdbCastMember) -> Self {
        Self {
            id: member.id,
            name: member.name.clone(),
            job: "Actor".to_string(),
        }
    }
}

/// Creative team of a movie; any role may be missing from the provider data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreditSet {
    pub director: Option<Person>,
    pub lead_actor: Option<Person>,
    pub screenwriter: Option<Person>,
}

impl CreditSet {
    pub fn director_name(&self) -> &str {
        display_name(&self.director)
    }

    pub fn lead_actor_name(&self) -> &str {
        display_name(&self.lead_actor)
    }

    pub fn screenwriter_name(&self) -> &str {
        display_name(&self.screenwriter)
    }
}

fn display_name(person: &Option<Person>) -> &str {
    person
        .as_ref()
        .map(|p| p.name.as_str())
        .unwrap_or(UNKNOWN_CREDIT)
}
