use serde::Deserialize;

/// Upstream movie database identifier
pub type MovieId = u64;

// ============================================================================
// Upstream movie database types (as relayed by the backend proxy)
// ============================================================================

/// Response of the `/movie_id` search relay
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub id: MovieId,
}

impl SearchResponse {
    /// Id of the first search hit, which is the only one the site uses
    pub fn first_id(&self) -> Option<MovieId> {
        self.results.first().map(|r| r.id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiGenre {
    pub name: String,
}

/// Raw movie record returned through `/proxy`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMovie {
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<ApiGenre>,
    #[serde(default)]
    pub runtime: Option<u32>,
}

// ============================================================================
// Client-side records
// ============================================================================

/// Flat movie detail record derived from a single upstream lookup
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetails {
    pub imdb_id: String,
    pub poster: String,
    pub title: String,
    pub overview: String,
    pub rating: f64,
    pub release_date: String,
    pub genres: Vec<String>,
    pub runtime: String,
}

impl MovieDetails {
    pub fn from_api(movie: ApiMovie, image_base_url: &str) -> Self {
        Self {
            imdb_id: movie.imdb_id.unwrap_or_default(),
            poster: image_url(image_base_url, movie.poster_path.as_deref()),
            title: movie.original_title.unwrap_or_default(),
            overview: movie.overview.unwrap_or_default(),
            rating: movie.vote_average.unwrap_or_default(),
            release_date: movie.release_date.unwrap_or_default(),
            genres: movie.genres.into_iter().map(|g| g.name).collect(),
            runtime: movie.runtime.map(format_runtime).unwrap_or_default(),
        }
    }
}

/// Formats a runtime in minutes as "H hours M minutes"
pub fn format_runtime(minutes: u32) -> String {
    format!("{} hours {} minutes", minutes / 60, minutes % 60)
}

/// Joins an image path onto the image base URL; a missing path yields an empty string
pub fn image_url(base: &str, path: Option<&str>) -> String {
    match path {
        Some(path) if !path.is_empty() => format!("{}{}", base.trim_end_matches('/'), path),
        _ => String::new(),
    }
}
