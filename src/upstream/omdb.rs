//! OMDb search client.
//!
//! A single OMDb search page holds at most ten entries and many of them have
//! no poster, so pages are walked one at a time until enough poster-bearing
//! entries have been collected.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{MovieId, MovieSource, MovieSummary, UpstreamError};
use crate::catalog::{Category, Selector};
use crate::config::{OmdbConfig, ProviderKind};

/// Entries per OMDb search page.
const PAGE_SIZE: u32 = 10;

/// Poster value OMDb uses when there is no image.
const NO_POSTER: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePolicy {
    /// Stop once this many poster-bearing entries are collected.
    pub min_posters: usize,
    /// Never request more than this many pages.
    pub max_pages: u32,
    /// Truncate the collected list to this length.
    pub max_results: usize,
}

impl From<&OmdbConfig> for PagePolicy {
    fn from(config: &OmdbConfig) -> Self {
        Self {
            min_posters: config.min_posters,
            max_pages: config.max_pages,
            max_results: config.max_results,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    #[serde(rename = "Response", default)]
    pub response: String,
    #[serde(rename = "Search", default)]
    pub search: Option<Vec<SearchItem>>,
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl SearchPage {
    fn total(&self) -> u32 {
        self.total_results
            .as_deref()
            .and_then(|t| t.trim().parse().ok())
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchItem {
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
}

impl SearchItem {
    pub fn has_poster(&self) -> bool {
        matches!(self.poster.as_deref().map(str::trim), Some(p) if !p.is_empty() && p != NO_POSTER)
    }
}

impl From<SearchItem> for MovieSummary {
    fn from(item: SearchItem) -> Self {
        let source_url = (!item.imdb_id.is_empty())
            .then(|| format!("https://www.imdb.com/title/{}/", item.imdb_id));
        let has_poster = item.has_poster();
        let mut summary = MovieSummary::new(MovieId::Text(item.imdb_id), item.title, item.year);
        summary.poster_url = item.poster.filter(|_| has_poster);
        summary.source_url = source_url;
        summary
    }
}

/// Walk search pages strictly in sequence, keeping poster-bearing entries.
///
/// Stops after a page once `min_posters` entries are held, when the page
/// cap is reached, when the upstream reports no further pages, or when it
/// answers with anything but `Response: "True"`. An error on the first page
/// is returned; an error on a later page ends the walk with what was
/// already collected.
pub async fn collect_posters<F, Fut>(
    policy: PagePolicy,
    mut fetch_page: F,
) -> Result<Vec<SearchItem>, UpstreamError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<SearchPage, UpstreamError>>,
{
    let mut with_poster = Vec::new();

    for page in 1..=policy.max_pages {
        let data = match fetch_page(page).await {
            Ok(data) => data,
            Err(e) if page == 1 => return Err(e),
            Err(e) => {
                warn!(page, error = %e, "OMDb page failed, keeping earlier pages");
                break;
            }
        };

        if data.response != "True" {
            debug!(page, error = ?data.error, "OMDb reported no results");
            break;
        }
        let Some(items) = data.search.as_ref() else {
            break;
        };

        with_poster.extend(items.iter().filter(|m| m.has_poster()).cloned());

        if with_poster.len() >= policy.min_posters || page * PAGE_SIZE >= data.total() {
            break;
        }
    }

    with_poster.truncate(policy.max_results);
    Ok(with_poster)
}

#[derive(Debug)]
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    policy: PagePolicy,
}

impl OmdbClient {
    pub fn new(config: &OmdbConfig, api_key: &str) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
            policy: PagePolicy::from(config),
        })
    }

    fn search_url(&self, term: &str, page: u32) -> String {
        format!(
            "{}/?s={}&type=movie&page={}&apikey={}",
            self.base_url,
            urlencoding::encode(term),
            page,
            urlencoding::encode(&self.api_key),
        )
    }

    async fn search_page(&self, term: &str, page: u32) -> Result<SearchPage, UpstreamError> {
        debug!(term, page, "OMDb search");

        let response = self.client.get(self.search_url(term, page)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::status(status.as_u16(), &body));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

#[async_trait]
impl MovieSource for OmdbClient {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Omdb
    }

    async fn fetch(&self, category: &Category) -> Result<Vec<MovieSummary>, UpstreamError> {
        let Selector::Search(term) = category.selector else {
            return Err(UpstreamError::Selector(category.id));
        };

        let items = collect_posters(self.policy, |page| self.search_page(term, page)).await?;
        Ok(items.into_iter().map(MovieSummary::from).collect())
    }
}
