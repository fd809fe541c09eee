//! Validated reconciliation inputs.
//!
//! Raw option strings are turned into these types before any remote call is
//! made, so a malformed location or a missing selector fails the run without
//! touching the network.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{BoardError, ColumnName, IssueNumber, OwnerLogin, ProjectName, ProjectNumber, RepositoryName};

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// A repository in `"owner/repo"` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub owner: OwnerLogin,
    pub name: RepositoryName,
}

impl RepositoryRef {
    pub fn new(owner: OwnerLogin, name: RepositoryName) -> Self {
        Self { owner, name }
    }
}

impl FromStr for RepositoryRef {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.trim().split('/');
        let owner = segments.next().and_then(OwnerLogin::new);
        let name = segments.next().and_then(RepositoryName::new);
        match (owner, name, segments.next()) {
            (Some(owner), Some(name), None) => Ok(Self { owner, name }),
            _ => Err(BoardError::configuration(format!(
                "repository '{s}' must have the form 'owner/repo'"
            ))),
        }
    }
}

impl std::fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Where project boards are looked up: an owner, or one of its repositories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectLocation {
    /// Boards owned by an organization or an individual account.
    Owner(OwnerLogin),
    /// Boards attached to a single repository.
    Repository(RepositoryRef),
}

impl ProjectLocation {
    /// Returns the owner segment of the location.
    pub fn owner(&self) -> &OwnerLogin {
        match self {
            Self::Owner(owner) => owner,
            Self::Repository(repo) => &repo.owner,
        }
    }
}

impl FromStr for ProjectLocation {
    type Err = BoardError;

    /// Parses `owner` or `owner/repo`. A trailing slash (`owner/`) names the
    /// owner alone.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut segments = trimmed.split('/');
        let owner = segments.next().and_then(OwnerLogin::new).ok_or_else(|| {
            BoardError::configuration(format!(
                "project location '{s}' must have the form 'owner' or 'owner/repo'"
            ))
        })?;
        let repo = segments.next().and_then(RepositoryName::new);
        if segments.next().is_some() {
            return Err(BoardError::configuration(format!(
                "project location '{s}' has more than two segments"
            )));
        }
        Ok(match repo {
            Some(name) => Self::Repository(RepositoryRef { owner, name }),
            None => Self::Owner(owner),
        })
    }
}

/// The concrete listing a location resolves to once the owner is classified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectScope {
    Repository(RepositoryRef),
    Organization(OwnerLogin),
    User(OwnerLogin),
}

impl std::fmt::Display for ProjectScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repository(repo) => write!(f, "repository {repo}"),
            Self::Organization(org) => write!(f, "organization {org}"),
            Self::User(user) => write!(f, "user {user}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Selector
// ---------------------------------------------------------------------------

/// How the caller picks a project out of its location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectSelector {
    Number(ProjectNumber),
    Name(ProjectName),
}

impl ProjectSelector {
    /// Builds a selector from raw `project-number` and `project-name` inputs.
    ///
    /// A number that parses to a positive integer wins, and the name is then
    /// ignored. An empty, non-numeric, or non-positive number counts as absent.
    ///
    /// # Errors
    ///
    /// [`BoardError::Configuration`] if neither input yields a selector.
    pub fn from_inputs(number: Option<&str>, name: Option<&str>) -> Result<Self, BoardError> {
        let number = number
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .and_then(|n| u64::try_from(n).ok())
            .filter(|n| *n > 0);
        if let Some(number) = number {
            return Ok(Self::Number(ProjectNumber::new(number)));
        }
        name.and_then(ProjectName::new).map(Self::Name).ok_or_else(|| {
            BoardError::configuration(
                "A valid input for project-number OR project-name must be supplied.",
            )
        })
    }
}

impl std::fmt::Display for ProjectSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(number) => write!(f, "number {number}"),
            Self::Name(name) => write!(f, "name '{name}'"),
        }
    }
}

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

/// What to do when the owner classifier cannot tell organization from user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerFallback {
    /// Treat the owner as an individual account.
    #[default]
    Individual,
    /// Abort the run with [`BoardError::OwnerUnclassified`].
    Fail,
}

impl FromStr for OwnerFallback {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "individual" | "user" => Ok(Self::Individual),
            "fail" => Ok(Self::Fail),
            other => Err(BoardError::configuration(format!(
                "unknown owner fallback '{other}' (expected 'individual' or 'fail')"
            ))),
        }
    }
}

/// Which project resolution strategy a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStrategy {
    /// Exhaustive listing with exact number or name match.
    #[default]
    Listing,
    /// Direct query: exact on number, fuzzy search on name.
    Query,
}

impl FromStr for ResolutionStrategy {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "listing" | "rest" => Ok(Self::Listing),
            "query" | "graphql" => Ok(Self::Query),
            other => Err(BoardError::configuration(format!(
                "unknown resolution strategy '{other}' (expected 'listing' or 'query')"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Everything one reconciliation needs to know about its target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileRequest {
    pub location: ProjectLocation,
    pub selector: ProjectSelector,
    pub column: ColumnName,
    pub repository: RepositoryRef,
    pub issue_number: IssueNumber,
}
