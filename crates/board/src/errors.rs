//! Error types for the reconciliation domain.
//!
//! [`GatewayError`] is what a [`crate::ProjectBoardGateway`] implementation
//! reports for a failed remote call. [`BoardError`] is what a reconciliation
//! run reports to its caller; gateway failures are carried inside it.
//!
//! Nothing here is retried. Every error aborts the run that produced it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::OwnerLogin;

// ---------------------------------------------------------------------------
// Gateway errors
// ---------------------------------------------------------------------------

/// Failure of a single remote call.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GatewayError {
    /// The remote system answered that the addressed resource does not exist.
    #[error("Remote resource not found: {resource}")]
    NotFound {
        /// Description of the resource (usually the request path).
        resource: String,
    },

    /// The remote system answered with a non-success status.
    #[error("Remote call failed with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body, if any.
        message: String,
    },

    /// The request never produced a response (connection, TLS, timeout).
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The response body could not be decoded into the expected record.
    #[error("Could not decode response: {message}")]
    Decode { message: String },

    /// A query-style call returned an `errors` payload.
    #[error("Query failed: {message}")]
    Query { message: String },
}

impl GatewayError {
    /// Returns `true` if the remote system definitively reported "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ---------------------------------------------------------------------------
// Reconciliation errors
// ---------------------------------------------------------------------------

/// The kind of entity a [`BoardError::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Project,
    Column,
    Content,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Project => "project",
            Self::Column => "column",
            Self::Content => "issue or pull request",
        })
    }
}

/// Errors that abort a reconciliation run.
///
/// The `Display` text of each variant is the failure reason surfaced to the
/// invoking harness.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The supplied inputs cannot describe a reconciliation.
    ///
    /// Produced before any remote call is made.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A project, column, or piece of content matching the inputs does not exist.
    #[error("No {resource} matching the supplied input found: {detail}")]
    NotFound {
        resource: Resource,
        /// What was searched for (e.g. `"column 'In Progress'"`).
        detail: String,
    },

    /// The owner could not be classified and the configured fallback refuses
    /// to guess.
    #[error("Could not determine whether '{owner}' is an organization: {reason}")]
    OwnerUnclassified { owner: OwnerLogin, reason: String },

    /// A remote call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl BoardError {
    /// Builds a [`BoardError::Configuration`] from any message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Builds a [`BoardError::NotFound`] for `resource`.
    pub fn not_found(resource: Resource, detail: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            detail: detail.into(),
        }
    }
}
