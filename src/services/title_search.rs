use crate::{
    error::{AppError, AppResult},
    models::TmdbMovie,
    services::providers::MetadataProvider,
};

/// Resolves a free-text title to the provider's top-ranked match
///
/// Fails with `NotFound` when the search comes back empty, quoting the provider's
/// status message when it sent one.
pub async fn resolve_title(provider: &dyn MetadataProvider, title: &str) -> AppResult<TmdbMovie> {
    let query = title.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput(
            "Movie title is required".to_string(),
        ));
    }

    let page = provider.search_movies(query).await?;

    match page.results.into_iter().next() {
        Some(movie) => {
            tracing::info!(
                query = %query,
                movie_id = movie.id,
                title = %movie.title,
                "Title resolved"
            );
            Ok(movie)
        }
        None => {
            let message = match page.status_message {
                Some(status) => format!("Movie \"{}\" not found: {}", query, status),
                None => format!("Movie \"{}\" not found", query),
            };
            Err(AppError::NotFound(message))
        }
    }
}
