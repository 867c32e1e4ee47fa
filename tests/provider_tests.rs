use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, response::IntoResponse};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use movie_dna_api::{
    error::{AppError, AppResult},
    services::{
        providers::{
            CompletionProvider, CompletionRequest, CreditRole, GroqProvider, MetadataProvider,
            TmdbProvider,
        },
        MovieDnaService, PipelineSettings,
    },
};

const SLOW_RESPONSE: Duration = Duration::from_secs(3);
const CLIENT_TIMEOUT: Duration = Duration::from_millis(300);

fn tmdb(server: &MockServer) -> TmdbProvider {
    TmdbProvider::new(
        reqwest::Client::new(),
        "test_key".to_string(),
        format!("{}/", server.uri()),
    )
}

fn groq(server: &MockServer) -> GroqProvider {
    GroqProvider::new(
        reqwest::Client::new(),
        "groq_key".to_string(),
        server.uri(),
    )
}

fn completion_request(prompt: &str) -> CompletionRequest {
    CompletionRequest {
        prompt: prompt.to_string(),
        model: "llama-3.1-8b-instant".to_string(),
        temperature: 0.6,
        max_tokens: 60,
    }
}

#[tokio::test]
async fn test_tmdb_search_sends_query_and_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("api_key", "test_key"))
        .and(query_param("query", "Inception"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "results": [
                {"id": 27205, "title": "Inception", "release_date": "2010-07-15",
                 "overview": "Dreams.", "poster_path": "/inception.jpg",
                 "vote_average": 8.4, "vote_count": 36000}
            ],
            "total_results": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = tmdb(&server).search_movies("Inception").await.unwrap();

    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].id, 27205);
    assert_eq!(page.results[0].vote_count, 36000);
}

#[tokio::test]
async fn test_tmdb_details_request_credits() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/27205"))
        .and(query_param("append_to_response", "credits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 27205,
            "title": "Inception",
            "release_date": "2010-07-15",
            "vote_average": 8.4,
            "vote_count": 36000,
            "genres": [{"id": 28, "name": "Action"}],
            "credits": {
                "cast": [{"id": 6193, "name": "Leonardo DiCaprio", "character": "Cobb"}],
                "crew": [{"id": 525, "name": "Christopher Nolan", "job": "Director",
                          "department": "Directing"}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let details = tmdb(&server).movie_details(27205).await.unwrap();

    assert_eq!(details.movie.title, "Inception");
    assert_eq!(details.genre_ids(), vec![28]);
    assert_eq!(details.credits.cast[0].name, "Leonardo DiCaprio");
    assert_eq!(details.credits.crew[0].job, "Director");
}

#[tokio::test]
async fn test_tmdb_discover_by_crew_member() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("with_crew", "525"))
        .and(query_param("sort_by", "popularity.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 157336, "title": "Interstellar", "release_date": "2014-11-05"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let movies = tmdb(&server)
        .discover_by_person(525, CreditRole::Crew)
        .await
        .unwrap();

    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].title, "Interstellar");
}

#[tokio::test]
async fn test_tmdb_discover_by_genres() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("with_genres", "28,878"))
        .and(query_param("sort_by", "vote_average.desc"))
        .and(query_param("vote_count.gte", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let movies = tmdb(&server).discover_by_genres(&[28, 878], 1000).await.unwrap();

    assert!(movies.is_empty());
}

#[tokio::test]
async fn test_tmdb_error_status_becomes_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/27205/similar"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"status_code":7,"status_message":"Invalid API key"}"#,
        ))
        .mount(&server)
        .await;

    let err = tmdb(&server).similar_movies(27205).await.unwrap_err();

    match &err {
        AppError::Provider {
            provider,
            status,
            body,
        } => {
            assert_eq!(*provider, "TMDB");
            assert_eq!(*status, 401);
            assert!(body.contains("Invalid API key"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.is_global());
    assert!(!err.to_string().contains("test_key"));
}

#[tokio::test]
async fn test_tmdb_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = tmdb(&server).search_movies("Inception").await.unwrap_err();

    assert!(matches!(err, AppError::Provider { status: 502, .. }));
}

#[tokio::test]
async fn test_groq_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer groq_key"))
        .and(body_partial_json(json!({
            "model": "llama-3.1-8b-instant",
            "max_tokens": 60,
            "messages": [{"role": "user", "content": "Why Interstellar?"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant",
                 "content": "  Both are Nolan epics about time.\n"}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = groq(&server)
        .complete(completion_request("Why Interstellar?"))
        .await
        .unwrap();

    assert_eq!(text, "Both are Nolan epics about time.");
}

#[tokio::test]
async fn test_groq_empty_choices_is_generation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = groq(&server)
        .complete(completion_request("anything"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Generation(_)));
}

#[tokio::test]
async fn test_groq_server_error_is_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = groq(&server)
        .complete(completion_request("anything"))
        .await
        .unwrap_err();

    match err {
        AppError::Provider { provider, status, body } => {
            assert_eq!(provider, "Groq");
            assert_eq!(status, 500);
            assert_eq!(body, "overloaded");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

struct CannedCompletion;

#[async_trait::async_trait]
impl CompletionProvider for CannedCompletion {
    async fn complete(&self, _request: CompletionRequest) -> AppResult<String> {
        Ok("A shared sensibility.".to_string())
    }

    fn name(&self) -> &'static str {
        "Canned"
    }
}

/// Pipeline wired to the mock server through a client with a short timeout
fn service_with_timeout(server: &MockServer) -> MovieDnaService {
    let http_client = reqwest::Client::builder()
        .timeout(CLIENT_TIMEOUT)
        .build()
        .unwrap();
    let metadata = TmdbProvider::new(http_client, "test_key".to_string(), server.uri());

    MovieDnaService::new(
        Arc::new(metadata),
        Arc::new(CannedCompletion),
        PipelineSettings {
            image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
            analysis_model: "big".to_string(),
            insight_model: Arc::from("small"),
        },
    )
}

fn movie_json(id: u64, title: &str, release_date: &str) -> serde_json::Value {
    json!({ "id": id, "title": title, "release_date": release_date, "vote_count": 5000 })
}

async fn mount_search(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "results": [movie_json(1, "Heat", "2005-12-15")] })),
        )
        .mount(server)
        .await;
}

fn details_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": 1,
        "title": "Heat",
        "release_date": "2005-12-15",
        "genres": [{"id": 80, "name": "Crime"}],
        "credits": { "cast": [], "crew": [] }
    }))
}

#[tokio::test]
async fn test_slow_axis_times_out_to_empty_list() {
    let server = MockServer::start().await;
    mount_search(&server).await;
    Mock::given(method("GET"))
        .and(path("/movie/1"))
        .respond_with(details_response())
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/1/similar"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "results": [movie_json(2, "Collateral", "2004-08-06")] }))
                .set_delay(SLOW_RESPONSE),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("with_genres", "80"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "results": [movie_json(3, "The Town", "2010-09-15")] })),
        )
        .mount(&server)
        .await;

    let report = service_with_timeout(&server).analyze("Heat").await.unwrap();

    assert!(report.recommendations.similar.is_empty());
    assert_eq!(report.recommendations.by_genre.len(), 1);
    assert_eq!(report.recommendations.by_genre[0].movie.id, 3);
    assert_eq!(report.original_movie.ai_analysis, "A shared sensibility.");
}

#[tokio::test]
async fn test_slow_details_fail_the_request() {
    let server = MockServer::start().await;
    mount_search(&server).await;
    Mock::given(method("GET"))
        .and(path("/movie/1"))
        .respond_with(details_response().set_delay(SLOW_RESPONSE))
        .mount(&server)
        .await;

    let err = service_with_timeout(&server)
        .analyze("Heat")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::HttpClient(ref e) if e.is_timeout()));
    assert!(!err.to_string().contains("test_key"));
    assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
}
