//! TMDB (The Movie Database) discover-by-genre client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{MovieId, MovieSource, MovieSummary, UpstreamError};
use crate::catalog::{Category, Selector};
use crate::config::{AuthMode, ProviderKind, TmdbConfig};

/// How the credential is attached to each request.
#[derive(Clone, PartialEq, Eq)]
pub enum TmdbAuth {
    ApiKey(String),
    Bearer(String),
}

impl std::fmt::Debug for TmdbAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TmdbAuth::ApiKey(_) => f.write_str("ApiKey(..)"),
            TmdbAuth::Bearer(_) => f.write_str("Bearer(..)"),
        }
    }
}

impl TmdbAuth {
    pub fn resolve(mode: AuthMode, key: &str) -> Self {
        let key = key.trim().to_string();
        match mode {
            AuthMode::ApiKey => TmdbAuth::ApiKey(key),
            AuthMode::Bearer => TmdbAuth::Bearer(key),
            AuthMode::Auto => {
                // v3 keys are ~32 hex chars, read access tokens are long JWTs.
                if key.len() > 100 || key.starts_with("eyJ") {
                    TmdbAuth::Bearer(key)
                } else {
                    TmdbAuth::ApiKey(key)
                }
            }
        }
    }

    fn mode_name(&self) -> &'static str {
        match self {
            TmdbAuth::ApiKey(_) => "api_key",
            TmdbAuth::Bearer(_) => "bearer",
        }
    }
}

#[derive(Debug, Deserialize)]
struct DiscoverResponse {
    #[serde(default)]
    results: Option<Vec<TmdbMovieResult>>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieResult {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    original_title: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    vote_average: Option<f64>,
    #[serde(default)]
    vote_count: Option<u64>,
    #[serde(default)]
    popularity: Option<f64>,
    #[serde(default)]
    original_language: Option<String>,
    #[serde(default)]
    overview: Option<String>,
}

#[derive(Debug)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    image_base_url: String,
    language: String,
    auth: TmdbAuth,
    max_results: usize,
    require_poster: bool,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig, api_key: &str) -> Result<Self, UpstreamError> {
        let auth = TmdbAuth::resolve(config.auth_mode, api_key);
        if config.auth_mode == AuthMode::Auto {
            warn!(
                detected = auth.mode_name(),
                "tmdb.auth_mode is not set; guessing from the credential format is deprecated, set it to api_key or bearer"
            );
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            image_base_url: config.image_base_url.clone(),
            language: config.language.clone(),
            auth,
            max_results: config.max_results,
            require_poster: config.require_poster,
        })
    }

    pub fn auth(&self) -> &TmdbAuth {
        &self.auth
    }

    fn discover_url(&self, genre_id: u32) -> String {
        let mut url = format!(
            "{}/discover/movie?with_genres={}&sort_by=popularity.desc&language={}&include_adult=false&page=1",
            self.base_url,
            genre_id,
            urlencoding::encode(&self.language),
        );
        if let TmdbAuth::ApiKey(ref key) = self.auth {
            url.push_str("&api_key=");
            url.push_str(&urlencoding::encode(key));
        }
        url
    }

    fn normalize(&self, results: Vec<TmdbMovieResult>) -> Vec<MovieSummary> {
        results
            .into_iter()
            .filter(|m| !self.require_poster || non_empty(&m.poster_path).is_some())
            .take(self.max_results)
            .map(|m| self.to_summary(m))
            .collect()
    }

    fn to_summary(&self, m: TmdbMovieResult) -> MovieSummary {
        let title = non_empty(&m.title)
            .or_else(|| non_empty(&m.original_title))
            .unwrap_or_default()
            .to_string();
        let release_date = non_empty(&m.release_date).map(str::to_string);
        let year = release_date
            .as_deref()
            .map(|d| d.chars().take(4).collect::<String>())
            .unwrap_or_else(|| "—".to_string());

        let mut summary = MovieSummary::new(MovieId::Numeric(m.id), title, year);
        summary.poster_url =
            non_empty(&m.poster_path).map(|p| format!("{}{}", self.image_base_url, p));
        summary.rating = m
            .vote_average
            .filter(|v| *v > 0.0)
            .map(|v| format!("{:.1}", v));
        summary.overview = non_empty(&m.overview).map(str::to_string);
        summary.original_title = non_empty(&m.original_title).map(str::to_string);
        summary.release_date = release_date;
        summary.vote_count = m.vote_count;
        summary.popularity = m.popularity.map(|p| format!("{:.1}", p));
        summary.language = non_empty(&m.original_language).map(str::to_uppercase);
        summary.source_url = Some(format!("https://www.themoviedb.org/movie/{}", m.id));
        summary
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

#[async_trait]
impl MovieSource for TmdbClient {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Tmdb
    }

    async fn fetch(&self, category: &Category) -> Result<Vec<MovieSummary>, UpstreamError> {
        let Selector::Genre(genre_id) = category.selector else {
            return Err(UpstreamError::Selector(category.id));
        };

        debug!(category = category.id, genre_id, auth = self.auth.mode_name(), "TMDB discover");

        let mut request = self
            .client
            .get(self.discover_url(genre_id))
            .header(header::ACCEPT, "application/json");
        if let TmdbAuth::Bearer(ref token) = self.auth {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::status(status.as_u16(), &body));
        }

        let bytes = response.bytes().await?;
        let data: DiscoverResponse =
            serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Decode(e.to_string()))?;

        Ok(self.normalize(data.results.unwrap_or_default()))
    }
}
