/// TMDB (The Movie Database) v3 API provider
///
/// Endpoints used:
/// 1. Title Search: /search/movie → ranked list of movies
/// 2. Details: /movie/{id}?append_to_response=credits → details with cast and crew
/// 3. Similar: /movie/{id}/similar → ranked list of movies
/// 4. Discover: /discover/movie with person or genre filters
///
/// Authentication uses the `api_key` query parameter, so errors built from
/// `reqwest::Error` have their URL stripped (see `AppError::from`).
use crate::{
    error::{AppError, AppResult},
    models::{GenreId, MovieId, PersonId, TmdbMovie, TmdbMovieDetails, TmdbPage},
    services::providers::{CreditRole, MetadataProvider},
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

const PROVIDER_NAME: &str = "TMDB";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    /// Creates a provider sharing the given client (which carries the request timeout)
    pub fn new(http_client: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Issues a GET against `path` and decodes the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                path = %path,
                status = %status,
                body = %body,
                provider = PROVIDER_NAME,
                "TMDB request failed"
            );
            return Err(AppError::Provider {
                provider: PROVIDER_NAME,
                status: status.as_u16(),
                body,
            });
        }

        let response_text = response.text().await?;
        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path,
                response = %response_text,
                "Failed to deserialize TMDB response"
            );
            AppError::malformed(PROVIDER_NAME, e)
        })
    }

    fn person_params(person_id: PersonId, role: CreditRole) -> Vec<(&'static str, String)> {
        let filter = match role {
            CreditRole::Cast => "with_cast",
            CreditRole::Crew => "with_crew",
        };

        vec![
            (filter, person_id.to_string()),
            ("sort_by", "popularity.desc".to_string()),
        ]
    }

    fn genre_params(genre_ids: &[GenreId], min_vote_count: u32) -> Vec<(&'static str, String)> {
        let genres = genre_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        vec![
            ("with_genres", genres),
            ("sort_by", "vote_average.desc".to_string()),
            ("vote_count.gte", min_vote_count.to_string()),
        ]
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn search_movies(&self, query: &str) -> AppResult<TmdbPage> {
        let page: TmdbPage = self
            .get_json("/search/movie", &[("query", query.to_string())])
            .await?;

        tracing::info!(
            query = %query,
            results = page.results.len(),
            provider = PROVIDER_NAME,
            "Title search completed"
        );

        Ok(page)
    }

    async fn movie_details(&self, movie_id: MovieId) -> AppResult<TmdbMovieDetails> {
        let details: TmdbMovieDetails = self
            .get_json(
                &format!("/movie/{}", movie_id),
                &[("append_to_response", "credits".to_string())],
            )
            .await?;

        tracing::info!(
            movie_id = movie_id,
            cast = details.credits.cast.len(),
            crew = details.credits.crew.len(),
            provider = PROVIDER_NAME,
            "Movie details fetched"
        );

        Ok(details)
    }

    async fn similar_movies(&self, movie_id: MovieId) -> AppResult<Vec<TmdbMovie>> {
        let page: TmdbPage = self
            .get_json(&format!("/movie/{}/similar", movie_id), &[])
            .await?;
        Ok(page.results)
    }

    async fn discover_by_person(
        &self,
        person_id: PersonId,
        role: CreditRole,
    ) -> AppResult<Vec<TmdbMovie>> {
        let page: TmdbPage = self
            .get_json("/discover/movie", &Self::person_params(person_id, role))
            .await?;
        Ok(page.results)
    }

    async fn discover_by_genres(
        &self,
        genre_ids: &[GenreId],
        min_vote_count: u32,
    ) -> AppResult<Vec<TmdbMovie>> {
        let page: TmdbPage = self
            .get_json(
                "/discover/movie",
                &Self::genre_params(genre_ids, min_vote_count),
            )
            .await?;
        Ok(page.results)
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let provider = TmdbProvider::new(
            HttpClient::new(),
            "test_key".to_string(),
            "http://test.local/3/".to_string(),
        );
        assert_eq!(provider.api_url, "http://test.local/3");
        assert_eq!(provider.name(), "TMDB");
    }

    #[test]
    fn test_person_params_cast() {
        let params = TmdbProvider::person_params(6193, CreditRole::Cast);
        assert_eq!(
            params,
            vec![
                ("with_cast", "6193".to_string()),
                ("sort_by", "popularity.desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_person_params_crew() {
        let params = TmdbProvider::person_params(525, CreditRole::Crew);
        assert_eq!(params[0], ("with_crew", "525".to_string()));
    }

    #[test]
    fn test_genre_params_join_ids() {
        let params = TmdbProvider::genre_params(&[28, 878, 12], 1000);
        assert_eq!(
            params,
            vec![
                ("with_genres", "28,878,12".to_string()),
                ("sort_by", "vote_average.desc".to_string()),
                ("vote_count.gte", "1000".to_string()),
            ]
        );
    }
}
