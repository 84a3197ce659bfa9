use std::future::Future;
use std::sync::Arc;

use tracing::Instrument;

use crate::{
    config::{CastDetailStrategy, Config},
    error::{AppError, AppResult},
    models::{Cast, CastBiographies, MovieDetails, MovieId, RecommendationPayload},
    services::{autocomplete::TitleCatalog, providers::RecommenderBackend},
    telemetry::{recommendation_span, RunId},
};

pub const NOT_FOUND_MESSAGE: &str = "Movie not found in our database";

/// Pipeline stages, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    MovieId,
    MovieDetails,
    SimilarTitles,
    Cast,
    CastDetails,
    Posters,
    Render,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::MovieId => "movie_id",
            Stage::MovieDetails => "movie_details",
            Stage::SimilarTitles => "similar_titles",
            Stage::Cast => "cast",
            Stage::CastDetails => "cast_details",
            Stage::Posters => "posters",
            Stage::Render => "render",
        }
    }
}

/// Chains the backend lookups for one title and submits the result for rendering
#[derive(Clone)]
pub struct Recommender {
    backend: Arc<dyn RecommenderBackend>,
    image_base_url: String,
    cast_detail_strategy: CastDetailStrategy,
}

impl Recommender {
    pub fn new(backend: Arc<dyn RecommenderBackend>, config: &Config) -> Self {
        Self {
            backend,
            image_base_url: config.image_base_url.clone(),
            cast_detail_strategy: config.cast_detail_strategy,
        }
    }

    /// Validates `title` against the catalog, then runs the pipeline
    ///
    /// Unknown or empty titles are rejected before any request is made.
    pub async fn search(&self, catalog: &TitleCatalog, title: &str) -> AppResult<String> {
        if title.is_empty() || !catalog.contains(title) {
            tracing::warn!(title = %title, "Title not in catalog");
            return Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()));
        }

        tracing::info!(title = %title, "Title found in catalog");
        self.recommend(title).await
    }

    /// Runs the pipeline for `title` and returns the rendered HTML
    ///
    /// Used directly for titles taken from a rendered results page, which need
    /// no catalog check.
    pub async fn recommend(&self, title: &str) -> AppResult<String> {
        let span = recommendation_span(RunId::new(), title);

        async {
            let payload = self.build_payload(title).await?;
            let form = payload.to_form()?;
            let html = stage(Stage::Render, self.backend.render_recommendation(&form)).await?;

            tracing::info!(bytes = html.len(), "Recommendation rendered");
            Ok::<_, AppError>(html)
        }
        .instrument(span)
        .await
    }

    /// Runs every lookup stage and aggregates the results
    pub async fn build_payload(&self, title: &str) -> AppResult<RecommendationPayload> {
        let movie_id = stage(Stage::MovieId, self.backend.search_movie_id(title)).await?;
        tracing::info!(movie_id, "Movie id resolved");

        let details = stage(Stage::MovieDetails, self.movie_details(movie_id)).await?;
        tracing::info!(imdb_id = %details.imdb_id, "Movie details fetched");

        let similar_titles = stage(Stage::SimilarTitles, self.backend.fetch_similar(title)).await?;
        tracing::info!(count = similar_titles.len(), "Similar titles fetched");

        let cast = stage(Stage::Cast, self.cast(movie_id)).await?;
        tracing::info!(count = cast.len(), "Cast fetched");

        let biographies = stage(Stage::CastDetails, self.cast_biographies(&cast)).await?;
        tracing::info!(count = biographies.len(), "Cast details fetched");

        let posters = stage(Stage::Posters, self.posters(&similar_titles)).await?;
        tracing::info!(count = posters.len(), "Posters fetched");

        Ok(RecommendationPayload {
            title: title.to_string(),
            details,
            cast,
            biographies,
            similar_titles,
            posters,
        })
    }

    async fn movie_details(&self, movie_id: MovieId) -> AppResult<MovieDetails> {
        let movie = self.backend.fetch_movie(movie_id).await?;
        Ok(MovieDetails::from_api(movie, &self.image_base_url))
    }

    async fn cast(&self, movie_id: MovieId) -> AppResult<Cast> {
        let credits = self.backend.fetch_credits(movie_id).await?;
        Ok(Cast::from_credits(credits, &self.image_base_url))
    }

    async fn cast_biographies(&self, cast: &Cast) -> AppResult<CastBiographies> {
        match self.cast_detail_strategy {
            CastDetailStrategy::Sequential => {
                let mut biographies = CastBiographies::default();
                for person_id in &cast.ids {
                    biographies.push(self.backend.fetch_person(*person_id).await?);
                }
                Ok(biographies)
            }
            CastDetailStrategy::Concurrent => {
                let backend = self.backend.clone();
                let people = run_batch(cast.ids.clone(), move |person_id| {
                    let backend = backend.clone();
                    async move { backend.fetch_person(person_id).await }
                })
                .await?;
                Ok(people.into_iter().collect())
            }
        }
    }

    /// Poster URL for each similar title, in the same order
    async fn posters(&self, titles: &[String]) -> AppResult<Vec<String>> {
        let backend = self.backend.clone();
        let movie_ids = run_batch(titles.to_vec(), move |title| {
            let backend = backend.clone();
            async move { backend.search_movie_id(&title).await }
        })
        .await?;

        let backend = self.backend.clone();
        let image_base_url = self.image_base_url.clone();
        run_batch(movie_ids, move |movie_id| {
            let backend = backend.clone();
            let image_base_url = image_base_url.clone();
            async move {
                let movie = backend.fetch_movie(movie_id).await?;
                Ok(MovieDetails::from_api(movie, &image_base_url).poster)
            }
        })
        .await
    }
}

/// Logs the failing stage before the error aborts the rest of the chain
async fn stage<T, F>(stage: Stage, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    fut.await.map_err(|e| {
        tracing::error!(stage = stage.as_str(), error = %e, "Recommendation aborted");
        e
    })
}

/// Spawns one task per item and joins them in input order
///
/// The first failed item fails the whole batch.
pub async fn run_batch<I, T, F, Fut>(items: Vec<I>, task: F) -> AppResult<Vec<T>>
where
    I: Send + 'static,
    T: Send + 'static,
    F: Fn(I) -> Fut,
    Fut: Future<Output = AppResult<T>> + Send + 'static,
{
    let tasks: Vec<_> = items.into_iter().map(|item| tokio::spawn(task(item))).collect();

    let mut results = Vec::with_capacity(tasks.len());
    for handle in tasks {
        match handle.await {
            Ok(Ok(result)) => results.push(result),
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Batch item failed");
                return Err(e);
            }
            Err(e) => {
                tracing::error!(error = %e, "Task join error");
                return Err(AppError::Internal(e.to_string()));
            }
        }
    }

    Ok(results)
}
