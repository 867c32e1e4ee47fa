use std::sync::Arc;
use std::time::Instant;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{
        report::SIMILAR_CONNECTION_NAME, Axes, Axis, CreditSet, DnaReport, MovieSummary,
        OriginalMovie, Recommendations, TmdbMovieDetails,
    },
    services::{
        analysis::analyze_movie,
        credits::extract_credits,
        insights::annotate_axis,
        providers::{CompletionProvider, MetadataProvider},
        recommendations::{gather_candidates, DiscoveryInput},
        title_search::resolve_title,
        year_filter::apply_year_filter,
    },
};

/// Pipeline knobs that do not belong to a provider
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub image_base_url: String,
    pub analysis_model: String,
    pub insight_model: Arc<str>,
}

impl From<&Config> for PipelineSettings {
    fn from(config: &Config) -> Self {
        Self {
            image_base_url: config.tmdb_image_base_url.clone(),
            analysis_model: config.analysis_model.clone(),
            insight_model: Arc::from(config.insight_model.as_str()),
        }
    }
}

/// Builds movie DNA reports from a metadata provider and a completion provider
#[derive(Clone)]
pub struct MovieDnaService {
    metadata: Arc<dyn MetadataProvider>,
    completion: Arc<dyn CompletionProvider>,
    settings: PipelineSettings,
}

impl MovieDnaService {
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        completion: Arc<dyn CompletionProvider>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            metadata,
            completion,
            settings,
        }
    }

    /// Runs the full pipeline for a free-text title
    ///
    /// 1. Resolve the title and fetch details with credits
    /// 2. Extract the creative team and generate the narrative analysis
    /// 3. Gather candidates on all five axes, then apply the year filter
    /// 4. Annotate every candidate with an insight and assemble the report
    pub async fn analyze(&self, movie_title: &str) -> AppResult<DnaReport> {
        let start = Instant::now();

        let found = resolve_title(self.metadata.as_ref(), movie_title).await?;
        let details = self.metadata.movie_details(found.id).await?;
        if details.movie.id != found.id {
            return Err(AppError::malformed(
                self.metadata.name(),
                format!("details for {} returned id {}", found.id, details.movie.id),
            ));
        }

        let credits = extract_credits(&details.credits);
        tracing::info!(
            movie_id = details.movie.id,
            director = %credits.director_name(),
            lead_actor = %credits.lead_actor_name(),
            screenwriter = %credits.screenwriter_name(),
            "Creative team extracted"
        );

        let summary = MovieSummary::from_tmdb(&details.movie, &self.settings.image_base_url);
        let ai_analysis = analyze_movie(
            self.completion.as_ref(),
            &self.settings.analysis_model,
            &summary,
            &credits,
        )
        .await;

        let genre_ids = details.genre_ids();
        let mut candidates = gather_candidates(
            self.metadata.as_ref(),
            &DiscoveryInput {
                movie_id: details.movie.id,
                credits: &credits,
                genre_ids: &genre_ids,
                image_base_url: &self.settings.image_base_url,
            },
        )
        .await?;

        apply_year_filter(summary.year, &mut candidates);

        let recommendations = self
            .annotate(&summary.title, &credits, &details, candidates)
            .await;

        tracing::info!(
            movie_id = summary.id,
            recommendations = recommendations.total_len(),
            processing_time_ms = start.elapsed().as_millis(),
            "Movie DNA analysis completed"
        );

        Ok(assemble_report(
            summary,
            &credits,
            details.genre_names(),
            ai_analysis,
            recommendations,
        ))
    }

    /// Generates insights for every axis; axes run concurrently
    async fn annotate(
        &self,
        original_title: &str,
        credits: &CreditSet,
        details: &TmdbMovieDetails,
        candidates: Axes<MovieSummary>,
    ) -> Recommendations {
        let original_title: Arc<str> = Arc::from(original_title);
        let genre_names = details.genre_names().join(", ");
        let Axes {
            by_director,
            by_actor,
            by_writer,
            similar,
            by_genre,
        } = candidates;

        let annotate = |axis: Axis, name: String, movies: Vec<MovieSummary>| {
            annotate_axis(
                self.completion.clone(),
                self.settings.insight_model.clone(),
                axis,
                original_title.clone(),
                name,
                movies,
            )
        };

        let (by_director, by_actor, by_writer, similar, by_genre) = tokio::join!(
            annotate(Axis::Director, credits.director_name().to_string(), by_director),
            annotate(Axis::Actor, credits.lead_actor_name().to_string(), by_actor),
            annotate(Axis::Writer, credits.screenwriter_name().to_string(), by_writer),
            annotate(Axis::Similar, SIMILAR_CONNECTION_NAME.to_string(), similar),
            annotate(Axis::Genre, genre_names, by_genre),
        );

        Axes {
            by_director,
            by_actor,
            by_writer,
            similar,
            by_genre,
        }
    }
}

/// Merges the pipeline outputs into the response shape
pub fn assemble_report(
    summary: MovieSummary,
    credits: &CreditSet,
    genres: Vec<String>,
    ai_analysis: String,
    recommendations: Recommendations,
) -> DnaReport {
    DnaReport {
        original_movie: OriginalMovie::new(summary, credits, genres, ai_analysis),
        recommendations,
    }
}
