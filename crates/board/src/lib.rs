//! Project card reconciliation domain.
//!
//! Given a project (by number or name), a target column, and an issue or pull
//! request, a run ensures exactly one card for that content exists on the
//! board and sits in the target column, creating or moving it as needed.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed from the remote board API through
//! [`ProjectBoardGateway`]; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers and URLs (`ProjectId`, `ContentUrl`, etc.) |
//! | [`types`] | Gateway records (`Project`, `Column`, `Card`, `Content`) and outcomes |
//! | [`inputs`] | Validated inputs (`ProjectLocation`, `ProjectSelector`, `ReconcileRequest`) |
//! | [`errors`] | `GatewayError` and `BoardError` |
//! | [`gateway`] | The `ProjectBoardGateway` port trait |
//! | [`pagination`] | Exhaustive and short-circuiting page walkers |
//! | [`owner`] | Organization / individual classification |
//! | [`project`] | Listing and query project resolvers |
//! | [`content`] | Issue / pull-request resolution |
//! | [`column`] | Column listing and matching |
//! | [`locator`] | Existing card search |
//! | [`reconciler`] | The create / move / no-op state machine |
//!
//! ## Execution Model
//!
//! A run is strictly sequential: each remote call completes before the next
//! one is issued, which keeps the first-match tie-break deterministic. Nothing
//! is cached between runs and nothing is retried.

pub mod column;
pub mod content;
pub mod errors;
pub mod gateway;
pub mod identifiers;
pub mod inputs;
pub mod locator;
pub mod owner;
pub mod pagination;
pub mod project;
pub mod reconciler;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{BoardError, GatewayError, Resource};
pub use gateway::ProjectBoardGateway;
pub use identifiers::{
    CardId, ColumnId, ColumnName, ColumnUrl, ContentId, ContentUrl, IssueNumber, OwnerLogin,
    ProjectId, ProjectName, ProjectNumber, RepositoryName, RunId,
};
pub use inputs::{
    OwnerFallback, ProjectLocation, ProjectScope, ProjectSelector, ReconcileRequest,
    RepositoryRef, ResolutionStrategy,
};
pub use owner::{classify_owner, OwnerKind};
pub use project::{ListingResolver, ProjectResolver, QueryResolver};
pub use reconciler::{CardState, Reconciler};
pub use types::{
    Card, CardPosition, Column, Content, ContentKind, IssueRecord, PageRequest, Project,
    PullRequestRecord, ReconcileOutcome, Transition, PAGE_SIZE,
};
