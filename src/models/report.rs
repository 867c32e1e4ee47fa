use serde::Serialize;

use super::{CreditSet, MovieSummary};

/// Fixed connection name for the similarity axis, which has no single shared entity
pub const SIMILAR_CONNECTION_NAME: &str = "Story & Audience Match";

/// One of the five recommendation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Director,
    Actor,
    Writer,
    Similar,
    Genre,
}

impl Axis {
    pub const ALL: [Axis; 5] = [
        Axis::Director,
        Axis::Actor,
        Axis::Writer,
        Axis::Similar,
        Axis::Genre,
    ];

    /// Maximum number of recommendations kept for this axis
    pub fn cap(self) -> usize {
        match self {
            Axis::Director | Axis::Actor | Axis::Writer => 2,
            Axis::Similar | Axis::Genre => 3,
        }
    }

    pub fn connection_type(self) -> ConnectionType {
        match self {
            Axis::Director => ConnectionType::Director,
            Axis::Actor => ConnectionType::LeadActor,
            Axis::Writer => ConnectionType::Screenwriter,
            Axis::Similar => ConnectionType::SimilarTheme,
            Axis::Genre => ConnectionType::SameGenre,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::Director => "director",
            Axis::Actor => "actor",
            Axis::Writer => "writer",
            Axis::Similar => "similar",
            Axis::Genre => "genre",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ConnectionType {
    Director,
    #[serde(rename = "Lead Actor")]
    LeadActor,
    Screenwriter,
    #[serde(rename = "Similar Theme")]
    SimilarTheme,
    #[serde(rename = "Same Genre")]
    SameGenre,
}

/// Why a movie was recommended
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Connection {
    #[serde(rename = "type")]
    pub kind: ConnectionType,
    pub name: String,
    /// Generated one-sentence rationale, empty when generation failed
    pub insight: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendedMovie {
    #[serde(flatten)]
    pub movie: MovieSummary,
    pub connection: Connection,
}

/// One ordered list per recommendation axis
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Axes<T> {
    pub by_director: Vec<T>,
    pub by_actor: Vec<T>,
    pub by_writer: Vec<T>,
    #[serde(rename = "similarMovies")]
    pub similar: Vec<T>,
    pub by_genre: Vec<T>,
}

impl<T> Default for Axes<T> {
    fn default() -> Self {
        Self {
            by_director: Vec::new(),
            by_actor: Vec::new(),
            by_writer: Vec::new(),
            similar: Vec::new(),
            by_genre: Vec::new(),
        }
    }
}

impl<T> Axes<T> {
    pub fn get(&self, axis: Axis) -> &Vec<T> {
        match axis {
            Axis::Director => &self.by_director,
            Axis::Actor => &self.by_actor,
            Axis::Writer => &self.by_writer,
            Axis::Similar => &self.similar,
            Axis::Genre => &self.by_genre,
        }
    }

    pub fn get_mut(&mut self, axis: Axis) -> &mut Vec<T> {
        match axis {
            Axis::Director => &mut self.by_director,
            Axis::Actor => &mut self.by_actor,
            Axis::Writer => &mut self.by_writer,
            Axis::Similar => &mut self.similar,
            Axis::Genre => &mut self.by_genre,
        }
    }

    /// Keeps only the entries matching `keep`, across every axis
    pub fn retain_all<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        for axis in Axis::ALL {
            self.get_mut(axis).retain(|entry| keep(entry));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Axis, &Vec<T>)> {
        Axis::ALL.into_iter().map(move |axis| (axis, self.get(axis)))
    }

    pub fn total_len(&self) -> usize {
        self.iter().map(|(_, entries)| entries.len()).sum()
    }
}

pub type Recommendations = Axes<RecommendedMovie>;

/// The searched movie together with its creative team and analysis
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OriginalMovie {
    #[serde(flatten)]
    pub movie: MovieSummary,
    pub director: String,
    pub lead_actor: String,
    pub screenwriter: String,
    pub genres: Vec<String>,
    pub ai_analysis: String,
}

impl OriginalMovie {
    pub fn new(
        movie: MovieSummary,
        credits: &CreditSet,
        genres: Vec<String>,
        ai_analysis: String,
    ) -> Self {
        Self {
            movie,
            director: credits.director_name().to_string(),
            lead_actor: credits.lead_actor_name().to_string(),
            screenwriter: credits.screenwriter_name().to_string(),
            genres,
            ai_analysis,
        }
    }
}

/// Full response of a movie DNA lookup
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DnaReport {
    pub original_movie: OriginalMovie,
    pub recommendations: Recommendations,
}
