use std::path::PathBuf;
use std::time::Duration;

/// Default API base URL for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";
/// Default per-request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Default location of the durable session file.
const DEFAULT_SESSION_FILE: &str = ".fundhub/session.json";
/// Default page size for list fetches.
const DEFAULT_PAGE_LIMIT: u32 = 10;
/// Default delay before a debounced search fires.
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable was set but could not be parsed.
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the REST API, without a trailing slash.
    pub api_url: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Path of the JSON file backing durable session storage.
    pub session_file: PathBuf,
    /// Page size used when a list fetch does not specify one.
    pub page_limit: u32,
    /// Delay applied by debounced search before the request fires.
    pub search_debounce: Duration,
}

impl GatewayConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                  |
    /// |--------------------------------|--------------------------|
    /// | `FUNDHUB_API_URL`              | `http://localhost:5000`  |
    /// | `FUNDHUB_REQUEST_TIMEOUT_SECS` | `30`                     |
    /// | `FUNDHUB_SESSION_FILE`         | `.fundhub/session.json`  |
    /// | `FUNDHUB_PAGE_LIMIT`           | `10`                     |
    /// | `FUNDHUB_SEARCH_DEBOUNCE_MS`   | `300`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = std::env::var("FUNDHUB_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.into())
            .trim_end_matches('/')
            .to_string();

        let request_timeout_secs: u64 =
            parse_var("FUNDHUB_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        let session_file = std::env::var("FUNDHUB_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE));

        let page_limit: u32 = parse_var("FUNDHUB_PAGE_LIMIT", DEFAULT_PAGE_LIMIT)?;
        if page_limit == 0 {
            return Err(ConfigError::Invalid {
                var: "FUNDHUB_PAGE_LIMIT",
                value: "0".into(),
            });
        }

        let search_debounce_ms: u64 =
            parse_var("FUNDHUB_SEARCH_DEBOUNCE_MS", DEFAULT_SEARCH_DEBOUNCE_MS)?;

        Ok(Self {
            api_url,
            request_timeout: Duration::from_secs(request_timeout_secs),
            session_file,
            page_limit,
            search_debounce: Duration::from_millis(search_debounce_ms),
        })
    }

    /// Configuration pointing at `api_url` with every other field defaulted.
    pub fn for_api(api_url: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            page_limit: DEFAULT_PAGE_LIMIT,
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
        }
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}
