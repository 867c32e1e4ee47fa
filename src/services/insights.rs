use std::sync::Arc;

use crate::{
    models::{Axis, Connection, MovieSummary, RecommendedMovie},
    services::providers::{CompletionProvider, CompletionRequest},
};

pub const INSIGHT_TEMPERATURE: f32 = 0.6;
pub const INSIGHT_MAX_TOKENS: u32 = 60;

/// Phrases a generated insight uses when the candidate does not actually fit
const NO_CONNECTION_PHRASES: [&str; 5] = [
    "no connection",
    "not related",
    "vastly different",
    "unrelated",
    "not similar",
];

/// True when a generated insight admits there is no real connection
///
/// Plain phrase matching; kept in one place so a structured signal from the
/// completion provider can replace it.
pub fn signals_no_connection(insight: &str) -> bool {
    let lowered = insight.to_lowercase();
    NO_CONNECTION_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase))
}

/// Builds the prompt asking why `candidate_title` suits fans of `original_title`
///
/// `shared_name` is the person name or the joined genre list; the similarity axis
/// has no single shared entity and ignores it.
pub fn insight_prompt(
    axis: Axis,
    original_title: &str,
    candidate_title: &str,
    shared_name: &str,
) -> String {
    let attribute = match axis {
        Axis::Similar => {
            return format!(
                "In 1 short sentence, explain why fans of \"{}\" would enjoy \"{}\", \
                 focusing on shared themes, storytelling and audience appeal.",
                original_title, candidate_title
            )
        }
        Axis::Director => "director",
        Axis::Actor => "lead actor",
        Axis::Writer => "screenwriter",
        Axis::Genre => "genre",
    };

    format!(
        "You recommend \"{}\" to fans of \"{}\" because of shared {} ({}). \
         In 1 short sentence, explain the connection clearly.",
        candidate_title, original_title, attribute, shared_name
    )
}

/// Generates one insight; failures are logged and produce an empty string
pub async fn generate_insight(
    provider: &dyn CompletionProvider,
    model: &str,
    prompt: String,
) -> String {
    let request = CompletionRequest {
        prompt,
        model: model.to_string(),
        temperature: INSIGHT_TEMPERATURE,
        max_tokens: INSIGHT_MAX_TOKENS,
    };

    match provider.complete(request).await {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            tracing::warn!(
                error = %e,
                provider = provider.name(),
                "Recommendation insight unavailable"
            );
            String::new()
        }
    }
}

/// Annotates every candidate of one axis with a connection and generated insight
///
/// Candidates are processed concurrently and returned in their original order.
/// On the similarity axis, candidates whose insight disowns the match are dropped.
pub async fn annotate_axis(
    provider: Arc<dyn CompletionProvider>,
    model: Arc<str>,
    axis: Axis,
    original_title: Arc<str>,
    connection_name: String,
    candidates: Vec<MovieSummary>,
) -> Vec<RecommendedMovie> {
    let mut tasks = Vec::with_capacity(candidates.len());

    for candidate in &candidates {
        let provider = provider.clone();
        let model = model.clone();
        let prompt = insight_prompt(axis, &original_title, &candidate.title, &connection_name);
        let task =
            tokio::spawn(async move { generate_insight(provider.as_ref(), &model, prompt).await });
        tasks.push(task);
    }

    let mut annotated = Vec::with_capacity(candidates.len());

    for (candidate, task) in candidates.into_iter().zip(tasks) {
        let insight = match task.await {
            Ok(insight) => insight,
            Err(e) => {
                tracing::error!(error = %e, axis = axis.as_str(), "Insight task join error");
                String::new()
            }
        };

        if axis == Axis::Similar && signals_no_connection(&insight) {
            tracing::info!(
                movie_id = candidate.id,
                title = %candidate.title,
                "Dropping similar movie the insight calls unrelated"
            );
            continue;
        }

        annotated.push(RecommendedMovie {
            movie: candidate,
            connection: Connection {
                kind: axis.connection_type(),
                name: connection_name.clone(),
                insight,
            },
        });
    }

    annotated
}
