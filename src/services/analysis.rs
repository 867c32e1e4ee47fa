use crate::{
    models::{CreditSet, MovieSummary},
    services::providers::{CompletionProvider, CompletionRequest},
};

pub const ANALYSIS_TEMPERATURE: f32 = 0.7;
pub const ANALYSIS_MAX_TOKENS: u32 = 200;

/// Builds the narrative-analysis prompt for a movie and its creative team
pub fn analysis_prompt(movie: &MovieSummary, credits: &CreditSet) -> String {
    format!(
        "You are a movie expert. Analyze this movie's creative DNA:\n\n\
         Movie: \"{title}\" ({year})\n\
         Director: {director}\n\
         Lead Actor: {actor}\n\
         Screenwriter: {writer}\n\n\
         Provide a brief, engaging 2-3 sentence analysis of what makes this movie's \
         creative team special and why their collaboration creates unique storytelling. \
         Focus on their distinctive styles and contributions.",
        title = movie.title,
        year = movie.year,
        director = credits.director_name(),
        actor = credits.lead_actor_name(),
        writer = credits.screenwriter_name(),
    )
}

/// Generates a short prose analysis of the creative team
///
/// Best-effort: any provider failure is logged and yields an empty string.
pub async fn analyze_movie(
    provider: &dyn CompletionProvider,
    model: &str,
    movie: &MovieSummary,
    credits: &CreditSet,
) -> String {
    let request = CompletionRequest {
        prompt: analysis_prompt(movie, credits),
        model: model.to_string(),
        temperature: ANALYSIS_TEMPERATURE,
        max_tokens: ANALYSIS_MAX_TOKENS,
    };

    match provider.complete(request).await {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            tracing::warn!(
                error = %e,
                movie_id = movie.id,
                provider = provider.name(),
                "Narrative analysis unavailable"
            );
            String::new()
        }
    }
}
