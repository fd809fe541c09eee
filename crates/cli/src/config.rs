//! Command-line and GitHub Actions input handling.
//!
//! Every option can be given as a flag or through the environment variable a
//! GitHub Actions runner sets for an action input (`INPUT_<NAME>`, with the
//! name upper-cased and hyphens kept). Values are validated into a
//! [`Settings`] before any network call is made.

use board::{
    BoardError, ColumnName, IssueNumber, OwnerFallback, ProjectLocation, ProjectSelector,
    ReconcileRequest, RepositoryRef, ResolutionStrategy,
};
use clap::{Parser, ValueEnum};
use github::{GithubConfig, DEFAULT_API_URL, DEFAULT_GRAPHQL_URL};

/// Log line format written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Create or move the project card for an issue or pull request.
#[derive(Parser)]
#[command(name = "project-card", version)]
pub struct Cli {
    /// API token. Falls back to `GITHUB_TOKEN`.
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// `owner` or `owner/repo` owning the project board.
    #[arg(long, env = "INPUT_PROJECT-LOCATION")]
    pub project_location: Option<String>,

    /// Project number; used when it is a positive integer.
    #[arg(long, env = "INPUT_PROJECT-NUMBER")]
    pub project_number: Option<String>,

    /// Project name; used when no usable project number is given.
    #[arg(long, env = "INPUT_PROJECT-NAME")]
    pub project_name: Option<String>,

    /// Name of the column the card must end up in.
    #[arg(long, env = "INPUT_COLUMN-NAME")]
    pub column_name: Option<String>,

    /// `owner/repo` holding the issue or pull request. Falls back to `GITHUB_REPOSITORY`.
    #[arg(long, env = "INPUT_REPOSITORY")]
    pub repository: Option<String>,

    /// Issue or pull request number.
    #[arg(long, env = "INPUT_ISSUE-NUMBER")]
    pub issue_number: Option<String>,

    /// `listing` (exact match) or `query` (GraphQL; fuzzy on project name).
    #[arg(long, env = "INPUT_RESOLUTION-STRATEGY")]
    pub resolution_strategy: Option<String>,

    /// What to assume when the owner cannot be classified: `individual` or `fail`.
    #[arg(long, env = "INPUT_OWNER-FALLBACK")]
    pub owner_fallback: Option<String>,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[arg(long, env = "GITHUB_GRAPHQL_URL", default_value = DEFAULT_GRAPHQL_URL)]
    pub graphql_url: String,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Validated run configuration.
#[derive(Debug)]
pub struct Settings {
    pub request: ReconcileRequest,
    pub strategy: ResolutionStrategy,
    pub owner_fallback: OwnerFallback,
    pub github: GithubConfig,
}

/// Returns the value if it holds anything but whitespace.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn require(value: Option<String>, input: &str) -> Result<String, BoardError> {
    present(value).ok_or_else(|| BoardError::configuration(format!("input '{input}' must be supplied")))
}

impl Cli {
    /// Validates the parsed options.
    ///
    /// `fallback_env` supplies the runner-provided defaults (`GITHUB_TOKEN`,
    /// `GITHUB_REPOSITORY`) for options left empty.
    ///
    /// # Errors
    ///
    /// [`BoardError::Configuration`] naming the first invalid input.
    pub fn into_settings<F>(self, fallback_env: F) -> Result<Settings, BoardError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = require(
            present(self.token).or_else(|| fallback_env("GITHUB_TOKEN")),
            "token",
        )?;
        let location: ProjectLocation = require(self.project_location, "project-location")?.parse()?;
        let selector =
            ProjectSelector::from_inputs(self.project_number.as_deref(), self.project_name.as_deref())?;
        let column = ColumnName::new(require(self.column_name, "column-name")?)
            .ok_or_else(|| BoardError::configuration("input 'column-name' must be supplied"))?;
        let repository: RepositoryRef = require(
            present(self.repository).or_else(|| fallback_env("GITHUB_REPOSITORY")),
            "repository",
        )?
        .parse()?;

        let raw_number = require(self.issue_number, "issue-number")?;
        let issue_number = raw_number
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|n| *n > 0)
            .map(IssueNumber::new)
            .ok_or_else(|| {
                BoardError::configuration(format!(
                    "input 'issue-number' must be a positive integer, got '{raw_number}'"
                ))
            })?;

        let strategy = present(self.resolution_strategy)
            .map(|raw| raw.parse::<ResolutionStrategy>())
            .transpose()?
            .unwrap_or_default();
        let owner_fallback = present(self.owner_fallback)
            .map(|raw| raw.parse::<OwnerFallback>())
            .transpose()?
            .unwrap_or_default();

        let github = GithubConfig::new(token)
            .with_api_url(self.api_url)
            .with_graphql_url(self.graphql_url);

        Ok(Settings {
            request: ReconcileRequest {
                location,
                selector,
                column,
                repository,
                issue_number,
            },
            strategy,
            owner_fallback,
            github,
        })
    }
}
