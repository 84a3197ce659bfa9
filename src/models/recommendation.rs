use serde::Serialize;

use crate::error::AppResult;

use super::{Cast, CastBiographies, MovieDetails};

/// Everything the results page needs, aggregated by the orchestrator
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationPayload {
    pub title: String,
    pub details: MovieDetails,
    pub cast: Cast,
    pub biographies: CastBiographies,
    /// Similar titles, in the order the backend ranked them
    pub similar_titles: Vec<String>,
    /// Poster URLs aligned with `similar_titles`
    pub posters: Vec<String>,
}

/// Flat form body posted to `/recommend`; list fields travel as JSON strings
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendForm {
    pub title: String,
    pub cast_ids: String,
    pub cast_names: String,
    pub cast_chars: String,
    pub cast_profiles: String,
    pub cast_bdays: String,
    pub cast_bios: String,
    pub cast_places: String,
    pub imdb_id: String,
    pub poster: String,
    pub rating: f64,
    pub release_date: String,
    pub runtime: String,
    pub overview: String,
    pub recommended_movies: String,
    pub genres: String,
    pub posters: String,
}

impl RecommendationPayload {
    pub fn to_form(&self) -> AppResult<RecommendForm> {
        Ok(RecommendForm {
            title: self.title.clone(),
            cast_ids: serde_json::to_string(&self.cast.ids)?,
            cast_names: serde_json::to_string(&self.cast.names)?,
            cast_chars: serde_json::to_string(&self.cast.characters)?,
            cast_profiles: serde_json::to_string(&self.cast.profiles)?,
            cast_bdays: serde_json::to_string(&self.biographies.birthdays)?,
            cast_bios: serde_json::to_string(&self.biographies.biographies)?,
            cast_places: serde_json::to_string(&self.biographies.places_of_birth)?,
            imdb_id: self.details.imdb_id.clone(),
            poster: self.details.poster.clone(),
            rating: self.details.rating,
            release_date: self.details.release_date.clone(),
            runtime: self.details.runtime.clone(),
            overview: self.details.overview.clone(),
            recommended_movies: serde_json::to_string(&self.similar_titles)?,
            genres: serde_json::to_string(&self.details.genres)?,
            posters: serde_json::to_string(&self.posters)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> RecommendationPayload {
        RecommendationPayload {
            title: "Inception".to_string(),
            details: MovieDetails {
                imdb_id: "tt1375666".to_string(),
                poster: "https://img/inception.jpg".to_string(),
                title: "Inception".to_string(),
                overview: "Dreams within dreams.".to_string(),
                rating: 8.4,
                release_date: "2010-07-15".to_string(),
                genres: vec!["Action".to_string(), "Thriller".to_string()],
                runtime: "2 hours 28 minutes".to_string(),
            },
            cast: Cast {
                ids: vec![6193, 24045],
                names: vec!["Leonardo DiCaprio".to_string(), "Joseph Gordon-Levitt".to_string()],
                characters: vec!["Cobb".to_string(), "Arthur".to_string()],
                profiles: vec!["https://img/leo.jpg".to_string(), "https://img/jgl.jpg".to_string()],
            },
            biographies: CastBiographies {
                birthdays: vec!["Nov 11 1974".to_string(), "Feb 17 1981".to_string()],
                biographies: vec!["Said \"hello\"\nthen left.".to_string(), String::new()],
                places_of_birth: vec!["Los Angeles".to_string(), "Los Angeles".to_string()],
            },
            similar_titles: vec!["Interstellar".to_string()],
            posters: vec!["https://img/interstellar.jpg".to_string()],
        }
    }

    #[test]
    fn test_form_encodes_lists_as_json() {
        let form = payload().to_form().unwrap();

        assert_eq!(form.cast_ids, "[6193,24045]");
        assert_eq!(form.cast_names, r#"["Leonardo DiCaprio","Joseph Gordon-Levitt"]"#);
        assert_eq!(form.genres, r#"["Action","Thriller"]"#);
        assert_eq!(form.recommended_movies, r#"["Interstellar"]"#);
        assert_eq!(form.posters, r#"["https://img/interstellar.jpg"]"#);
        assert_eq!(form.imdb_id, "tt1375666");
        assert_eq!(form.rating, 8.4);
    }

    #[test]
    fn test_form_escapes_biographies() {
        let form = payload().to_form().unwrap();
        assert_eq!(form.cast_bios, r#"["Said \"hello\"\nthen left.",""]"#);
    }
}
