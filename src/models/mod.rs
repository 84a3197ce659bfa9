mod cast;
mod movie;
mod recommendation;

pub use cast::{
    cast_size, format_birthday, ApiCastMember, ApiCredits, ApiPerson, Cast, CastBiographies,
    PersonId, FULL_CAST_SIZE, SHORT_CAST_SIZE,
};
pub use movie::{
    format_runtime, image_url, ApiGenre, ApiMovie, MovieDetails, MovieId, SearchResponse,
    SearchResult,
};
pub use recommendation::{RecommendForm, RecommendationPayload};
