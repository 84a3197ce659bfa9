//! HTTP backend over reqwest
//!
//! Endpoint flow used by the site:
//! 1. `/movie_id` and `/proxy` take a movie-database URL which the backend
//!    signs with its API key and forwards.
//! 2. `/MovieCastes` and `/CastesDetails` do the same for credits and people.
//! 3. `/similar` and `/titles` are answered from the backend's own catalog.
//! 4. `/recommend` takes a flat form and answers with an HTML fragment.

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{
        ApiCredits, ApiMovie, ApiPerson, MovieId, PersonId, RecommendForm, SearchResponse,
    },
    services::providers::RecommenderBackend,
};
use reqwest::{Client as HttpClient, Response};
use serde::{de::DeserializeOwned, Serialize};

#[derive(Debug, Serialize)]
struct QueryBody<'a> {
    query: &'a str,
}

#[derive(Debug, Serialize)]
struct UrlBody<'a> {
    #[serde(rename = "URL")]
    url: &'a str,
}

#[derive(Debug, Serialize)]
struct SearchBody<'a> {
    #[serde(rename = "URL")]
    url: &'a str,
    query: &'a str,
}

#[derive(Clone)]
pub struct HttpBackend {
    http_client: HttpClient,
    base_url: String,
    tmdb_api_url: String,
}

impl HttpBackend {
    pub fn new(config: &Config) -> AppResult<Self> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            tmdb_api_url: config.tmdb_api_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn movie_url(&self, movie_id: MovieId) -> String {
        format!("{}/movie/{}", self.tmdb_api_url, movie_id)
    }

    fn credits_url(&self, movie_id: MovieId) -> String {
        format!("{}/movie/{}/credits", self.tmdb_api_url, movie_id)
    }

    fn person_url(&self, person_id: PersonId) -> String {
        format!("{}/person/{}", self.tmdb_api_url, person_id)
    }

    fn search_url(&self) -> String {
        format!("{}/search/movie", self.tmdb_api_url)
    }

    /// Posts a one-element JSON array, the envelope every lookup endpoint expects
    async fn post_json<B, T>(&self, path: &str, body: B) -> AppResult<T>
    where
        B: Serialize + Send,
        T: DeserializeOwned,
    {
        let response = self
            .http_client
            .post(self.endpoint(path))
            .json(&[body])
            .send()
            .await?;

        Self::parse_json(path, response).await
    }

    async fn parse_json<T: DeserializeOwned>(path: &str, response: Response) -> AppResult<T> {
        let response = Self::check_status(path, response).await?;

        let response_text = response.text().await?;
        tracing::debug!(endpoint = path, response = %response_text, "Raw backend response");

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                endpoint = path,
                error = %e,
                "Failed to deserialize backend response"
            );
            AppError::ExternalApi(format!("Failed to parse {} response: {}", path, e))
        })
    }

    async fn check_status(path: &str, response: Response) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::ExternalApi(format!(
            "{} returned status {}: {}",
            path, status, body
        )))
    }
}

#[async_trait::async_trait]
impl RecommenderBackend for HttpBackend {
    async fn fetch_titles(&self) -> AppResult<Vec<String>> {
        let response = self.http_client.get(self.endpoint("/titles")).send().await?;
        let titles: Vec<String> = Self::parse_json("/titles", response).await?;

        tracing::info!(count = titles.len(), "Title catalog fetched");
        Ok(titles)
    }

    async fn search_movie_id(&self, title: &str) -> AppResult<MovieId> {
        let url = self.search_url();
        let search: SearchResponse = self
            .post_json("/movie_id", SearchBody { url: &url, query: title })
            .await?;

        search.first_id().ok_or_else(|| {
            AppError::ExternalApi(format!("No movie id found for title {}", title))
        })
    }

    async fn fetch_movie(&self, movie_id: MovieId) -> AppResult<ApiMovie> {
        let url = self.movie_url(movie_id);
        let params = serde_json::to_string(&UrlBody { url: &url })?;

        let response = self
            .http_client
            .get(self.endpoint("/proxy"))
            .query(&[("params", params)])
            .send()
            .await?;

        Self::parse_json("/proxy", response).await
    }

    async fn fetch_similar(&self, title: &str) -> AppResult<Vec<String>> {
        self.post_json("/similar", QueryBody { query: title }).await
    }

    async fn fetch_credits(&self, movie_id: MovieId) -> AppResult<ApiCredits> {
        let url = self.credits_url(movie_id);
        self.post_json("/MovieCastes", UrlBody { url: &url }).await
    }

    async fn fetch_person(&self, person_id: PersonId) -> AppResult<ApiPerson> {
        let url = self.person_url(person_id);
        self.post_json("/CastesDetails", UrlBody { url: &url }).await
    }

    async fn render_recommendation(&self, form: &RecommendForm) -> AppResult<String> {
        let response = self
            .http_client
            .post(self.endpoint("/recommend"))
            .form(form)
            .send()
            .await?;

        let html = Self::check_status("/recommend", response).await?.text().await?;
        Ok(html)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
