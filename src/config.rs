use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub provider: ProviderKind,
    #[serde(default)]
    pub render: RenderMode,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(skip)]
    pub debug_logs: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

/// Which upstream movie-metadata service backs `/api/movies`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Tmdb,
    Omdb,
}

impl ProviderKind {
    /// Name of the environment variable holding this provider's credential.
    pub fn credential_var(&self) -> &'static str {
        match self {
            ProviderKind::Tmdb => "TMDB_API_KEY",
            ProviderKind::Omdb => "OMDB_API_KEY",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::Tmdb => "TMDB",
            ProviderKind::Omdb => "OMDb",
        }
    }
}

/// How `GET /` is produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Static shell; the browser fetches one category per tab click.
    #[default]
    Client,
    /// Every category is fetched at page load and embedded in the HTML.
    Prerendered,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Wrap `/api/movies` results as `{category, movies}` instead of a bare array.
    #[serde(default)]
    pub envelope: bool,
}

/// How the TMDB credential is transmitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// `?api_key=` query parameter (v3 key).
    ApiKey,
    /// `Authorization: Bearer` header (read access token).
    Bearer,
    /// Guess from the shape of the credential. Deprecated.
    #[default]
    Auto,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub auth_mode: AuthMode,
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
    #[serde(default = "default_tmdb_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_tmdb_language")]
    pub language: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_tmdb_max_results")]
    pub max_results: usize,
    #[serde(default = "default_true")]
    pub require_poster: bool,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            auth_mode: AuthMode::default(),
            base_url: default_tmdb_base_url(),
            image_base_url: default_tmdb_image_base_url(),
            language: default_tmdb_language(),
            timeout_secs: default_timeout_secs(),
            max_results: default_tmdb_max_results(),
            require_poster: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OmdbConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_omdb_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_omdb_min_posters")]
    pub min_posters: usize,
    #[serde(default = "default_omdb_max_pages")]
    pub max_pages: u32,
    #[serde(default = "default_omdb_max_results")]
    pub max_results: usize,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_omdb_base_url(),
            timeout_secs: default_timeout_secs(),
            min_posters: default_omdb_min_posters(),
            max_pages: default_omdb_max_pages(),
            max_results: default_omdb_max_results(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    8
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_tmdb_language() -> String {
    "es-MX".to_string()
}

fn default_tmdb_max_results() -> usize {
    20
}

fn default_omdb_base_url() -> String {
    "https://www.omdbapi.com".to_string()
}

fn default_omdb_min_posters() -> usize {
    8
}

fn default_omdb_max_pages() -> u32 {
    4
}

fn default_omdb_max_results() -> usize {
    12
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_string(), e))?;

        Ok(config)
    }

    /// Load the optional config file, then apply environment overrides.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Override fields from `PORT`, `TMDB_API_KEY` and `OMDB_API_KEY`.
    ///
    /// Empty values are treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = lookup("PORT") {
            self.listen.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv("PORT", port.clone()))?;
        }
        if let Some(key) = lookup("TMDB_API_KEY") {
            self.tmdb.api_key = Some(key);
        }
        if let Some(key) = lookup("OMDB_API_KEY") {
            self.omdb.api_key = Some(key);
        }
        Ok(())
    }

    /// Credential of the selected provider, if configured and non-empty.
    pub fn credential(&self) -> Option<&str> {
        let key = match self.provider {
            ProviderKind::Tmdb => self.tmdb.api_key.as_deref(),
            ProviderKind::Omdb => self.omdb.api_key.as_deref(),
        };
        key.filter(|k| !k.trim().is_empty())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
    #[error("Invalid value for {0}: {1:?}")]
    InvalidEnv(&'static str, String),
}
