//! Connection settings for [`crate::GithubGateway`].

use std::time::Duration;

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default GraphQL endpoint.
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Per-request timeout applied by the HTTP client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Endpoints, credentials, and client settings for the GitHub gateway.
#[derive(Clone)]
pub struct GithubConfig {
    /// REST base URL without a trailing slash (GitHub Enterprise: `https://host/api/v3`).
    pub api_url: String,
    /// Full GraphQL endpoint URL.
    pub graphql_url: String,
    /// Personal access token or installation token.
    pub token: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl GithubConfig {
    /// Creates a configuration for github.com with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            graphql_url: DEFAULT_GRAPHQL_URL.to_owned(),
            token: token.into(),
            user_agent: concat!("project-card/", env!("CARGO_PKG_VERSION")).to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the REST base URL. A trailing slash is dropped.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Overrides the GraphQL endpoint.
    pub fn with_graphql_url(mut self, url: impl Into<String>) -> Self {
        self.graphql_url = url.into();
        self
    }
}

// The token must never reach a log line.
impl std::fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubConfig")
            .field("api_url", &self.api_url)
            .field("graphql_url", &self.graphql_url)
            .field("token", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}
