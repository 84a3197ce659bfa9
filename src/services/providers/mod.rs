//! Recommendation backend abstraction
//!
//! The site's backend relays every movie-database lookup, so the client only ever
//! talks to one server. Each method maps to one backend endpoint; implementations
//! return the upstream shapes untouched and leave presentation to the callers.

use crate::{
    error::AppResult,
    models::{ApiCredits, ApiMovie, ApiPerson, MovieId, PersonId, RecommendForm},
};

pub mod http;

pub use http::HttpBackend;

/// Trait for the backend serving titles, relayed lookups and rendered results
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommenderBackend: Send + Sync {
    /// Full title catalog used for autocomplete and validation (`GET /titles`)
    async fn fetch_titles(&self) -> AppResult<Vec<String>>;

    /// Resolves a title to the id of its first search hit (`POST /movie_id`)
    async fn search_movie_id(&self, title: &str) -> AppResult<MovieId>;

    /// Raw movie record for an id (`GET /proxy`)
    async fn fetch_movie(&self, movie_id: MovieId) -> AppResult<ApiMovie>;

    /// Titles the backend considers similar (`POST /similar`)
    async fn fetch_similar(&self, title: &str) -> AppResult<Vec<String>>;

    /// Credits for a movie (`POST /MovieCastes`)
    async fn fetch_credits(&self, movie_id: MovieId) -> AppResult<ApiCredits>;

    /// Biographical record for one cast member (`POST /CastesDetails`)
    async fn fetch_person(&self, person_id: PersonId) -> AppResult<ApiPerson>;

    /// Submits the aggregated payload and returns the rendered HTML (`POST /recommend`)
    async fn render_recommendation(&self, form: &RecommendForm) -> AppResult<String>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}
