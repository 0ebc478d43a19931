pub mod error;
pub mod model;
pub mod omdb;
pub mod tmdb;

use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::Category;
use crate::config::{Config, ProviderKind};

pub use error::UpstreamError;
pub use model::{MovieId, MovieSummary};
pub use omdb::{OmdbClient, PagePolicy};
pub use tmdb::{TmdbClient, TmdbAuth};

/// An upstream movie-metadata service.
#[async_trait]
pub trait MovieSource: Send + Sync {
    fn provider(&self) -> ProviderKind;

    /// Fetch the movie summaries for one category, in upstream order.
    async fn fetch(&self, category: &Category) -> Result<Vec<MovieSummary>, UpstreamError>;
}

/// Build the source for the configured provider.
///
/// Returns `Ok(None)` when the provider's credential is not configured.
pub fn build_source(config: &Config) -> Result<Option<Arc<dyn MovieSource>>, UpstreamError> {
    let Some(key) = config.credential() else {
        return Ok(None);
    };
    let source: Arc<dyn MovieSource> = match config.provider {
        ProviderKind::Tmdb => Arc::new(TmdbClient::new(&config.tmdb, key)?),
        ProviderKind::Omdb => Arc::new(OmdbClient::new(&config.omdb, key)?),
    };
    Ok(Some(source))
}
