/// External provider abstractions
///
/// The pipeline only talks to providers through the two traits below: one for movie
/// metadata (TMDB) and one for text completions (Groq). Both are object-safe so the
/// application state can hold them as `Arc<dyn ...>` and tests can swap in fakes.
use crate::{
    error::AppResult,
    models::{GenreId, MovieId, PersonId, TmdbMovie, TmdbMovieDetails, TmdbPage},
};

pub mod groq;
pub mod tmdb;

pub use groq::GroqProvider;
pub use tmdb::TmdbProvider;

/// Which side of the credits a person is looked up on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditRole {
    Cast,
    Crew,
}

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Search movies by title, ranked by relevance
    ///
    /// An empty page is not an error here; the caller decides what "no match" means.
    async fn search_movies(&self, query: &str) -> AppResult<TmdbPage>;

    /// Fetch full details with the credits sub-resource embedded in the same call
    async fn movie_details(&self, movie_id: MovieId) -> AppResult<TmdbMovieDetails>;

    /// Movies the provider considers similar, ranked
    async fn similar_movies(&self, movie_id: MovieId) -> AppResult<Vec<TmdbMovie>>;

    /// Movies featuring a person, most popular first
    async fn discover_by_person(
        &self,
        person_id: PersonId,
        role: CreditRole,
    ) -> AppResult<Vec<TmdbMovie>>;

    /// Highest rated movies across the given genres with at least `min_vote_count` votes
    async fn discover_by_genres(
        &self,
        genre_ids: &[GenreId],
        min_vote_count: u32,
    ) -> AppResult<Vec<TmdbMovie>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// A single-turn completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Trait for generative text providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate text for a prompt
    ///
    /// Returns `AppError::Generation` when the provider answers without content.
    async fn complete(&self, request: CompletionRequest) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
