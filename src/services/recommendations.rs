use crate::{
    error::AppResult,
    models::{Axes, Axis, CreditSet, GenreId, MovieId, MovieSummary, Person, TmdbMovie},
    services::providers::{CreditRole, MetadataProvider},
};

/// Minimum vote count for genre recommendations, filters out low-sample ratings
pub const GENRE_MIN_VOTE_COUNT: u32 = 1000;

/// What the gatherer needs to know about the original movie
pub struct DiscoveryInput<'a> {
    pub movie_id: MovieId,
    pub credits: &'a CreditSet,
    pub genre_ids: &'a [GenreId],
    pub image_base_url: &'a str,
}

/// Discovers candidate movies along all five axes concurrently
///
/// Each axis fails independently: a failing lookup is logged and leaves that axis
/// empty. Only global failures (rejected credentials) abort the whole gathering.
pub async fn gather_candidates(
    provider: &dyn MetadataProvider,
    input: &DiscoveryInput<'_>,
) -> AppResult<Axes<MovieSummary>> {
    let (by_director, by_actor, by_writer, similar, by_genre) = tokio::join!(
        discover_for_person(provider, input.credits.director.as_ref(), CreditRole::Crew),
        discover_for_person(provider, input.credits.lead_actor.as_ref(), CreditRole::Cast),
        discover_for_person(provider, input.credits.screenwriter.as_ref(), CreditRole::Crew),
        provider.similar_movies(input.movie_id),
        discover_for_genres(provider, input.genre_ids),
    );

    let mut candidates = Axes::default();
    for (axis, result) in [
        (Axis::Director, by_director),
        (Axis::Actor, by_actor),
        (Axis::Writer, by_writer),
        (Axis::Similar, similar),
        (Axis::Genre, by_genre),
    ] {
        let movies = match result {
            Ok(movies) => movies,
            Err(e) if e.is_global() => {
                tracing::error!(error = %e, axis = axis.as_str(), "Discovery failed globally");
                return Err(e);
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    axis = axis.as_str(),
                    provider = provider.name(),
                    "Discovery failed for axis, continuing without it"
                );
                Vec::new()
            }
        };

        *candidates.get_mut(axis) = select_candidates(
            movies,
            input.movie_id,
            axis.cap(),
            input.image_base_url,
        );
    }

    tracing::info!(
        movie_id = input.movie_id,
        by_director = candidates.by_director.len(),
        by_actor = candidates.by_actor.len(),
        by_writer = candidates.by_writer.len(),
        similar = candidates.similar.len(),
        by_genre = candidates.by_genre.len(),
        "Candidates gathered"
    );

    Ok(candidates)
}

/// Movies for a credited person, or nothing without a provider call when the role is absent
async fn discover_for_person(
    provider: &dyn MetadataProvider,
    person: Option<&Person>,
    role: CreditRole,
) -> AppResult<Vec<TmdbMovie>> {
    match person {
        Some(person) => provider.discover_by_person(person.id, role).await,
        None => Ok(Vec::new()),
    }
}

async fn discover_for_genres(
    provider: &dyn MetadataProvider,
    genre_ids: &[GenreId],
) -> AppResult<Vec<TmdbMovie>> {
    if genre_ids.is_empty() {
        return Ok(Vec::new());
    }
    provider
        .discover_by_genres(genre_ids, GENRE_MIN_VOTE_COUNT)
        .await
}

/// Excludes the original movie, keeps provider ranking, caps and formats
fn select_candidates(
    movies: Vec<TmdbMovie>,
    original_id: MovieId,
    cap: usize,
    image_base_url: &str,
) -> Vec<MovieSummary> {
    movies
        .iter()
        .filter(|movie| movie.id != original_id)
        .take(cap)
        .map(|movie| MovieSummary::from_tmdb(movie, image_base_url))
        .collect()
}
