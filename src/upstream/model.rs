use serde::Serialize;

/// TMDB ids are numeric, OMDb ids are IMDb strings (`tt0133093`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MovieId {
    Numeric(u64),
    Text(String),
}

/// Normalized movie record returned to the browser.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    pub year: String,
    pub poster_url: Option<String>,
    pub rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Link to the movie's page on the upstream site.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl MovieSummary {
    pub fn new(id: MovieId, title: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            year: year.into(),
            poster_url: None,
            rating: None,
            overview: None,
            original_title: None,
            release_date: None,
            vote_count: None,
            popularity: None,
            language: None,
            source_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialized_shape() {
        let mut movie = MovieSummary::new(MovieId::Numeric(603), "The Matrix", "1999");
        movie.rating = Some("8.2".to_string());
        let value = serde_json::to_value(&movie).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 603,
                "title": "The Matrix",
                "year": "1999",
                "posterUrl": null,
                "rating": "8.2",
            })
        );

        let movie = MovieSummary::new(MovieId::Text("tt0133093".into()), "The Matrix", "1999");
        let value = serde_json::to_value(&movie).unwrap();
        assert_eq!(value["id"], "tt0133093");
        assert!(value["rating"].is_null());
    }
}
