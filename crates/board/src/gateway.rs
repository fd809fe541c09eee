//! The port through which the reconciliation talks to the remote board API.
//!
//! Infrastructure crates implement [`ProjectBoardGateway`]; the domain never
//! sees HTTP, authentication, or wire formats. Listing operations fetch one
//! page at a time. Walking pages to exhaustion is the domain's job (see
//! [`crate::pagination`]) so the termination rule lives in one place.

use async_trait::async_trait;

use crate::{
    Card, CardId, CardPosition, Column, ColumnId, ContentId, ContentKind, GatewayError,
    IssueNumber, IssueRecord, OwnerLogin, PageRequest, Project, ProjectId, ProjectScope,
    ProjectSelector, PullRequestRecord, RepositoryRef,
};

/// Authenticated access to projects, columns, cards, issues, and pull requests.
///
/// Calls are issued one at a time by the domain and never concurrently, so
/// implementations need no internal ordering guarantees beyond `Send + Sync`.
#[async_trait]
pub trait ProjectBoardGateway: Send + Sync {
    /// Looks up `owner` as an organization.
    ///
    /// # Errors
    ///
    /// [`GatewayError::NotFound`] if no organization has that login; any other
    /// variant if the lookup itself failed.
    async fn get_organization(&self, owner: &OwnerLogin) -> Result<(), GatewayError>;

    /// Returns one page of the projects visible in `scope`.
    async fn list_projects(
        &self,
        scope: &ProjectScope,
        page: PageRequest,
    ) -> Result<Vec<Project>, GatewayError>;

    /// Asks the remote system directly for a project's identifier.
    ///
    /// A [`ProjectSelector::Name`] is served by a title *search*, which may
    /// return a project whose name merely contains the requested text. The
    /// returned record carries the name actually matched so callers can tell.
    /// Returns `Ok(None)` when nothing matched.
    async fn query_project(
        &self,
        scope: &ProjectScope,
        selector: &ProjectSelector,
    ) -> Result<Option<Project>, GatewayError>;

    /// Returns one page of the columns of `project`, in board order.
    async fn list_columns(
        &self,
        project: ProjectId,
        page: PageRequest,
    ) -> Result<Vec<Column>, GatewayError>;

    /// Returns one page of the cards in `column`, in column order.
    async fn list_cards(
        &self,
        column: ColumnId,
        page: PageRequest,
    ) -> Result<Vec<Card>, GatewayError>;

    /// Fetches an issue (or the issue view of a pull request) by number.
    ///
    /// Returns `Ok(None)` when the repository has no such number.
    async fn get_issue(
        &self,
        repository: &RepositoryRef,
        number: IssueNumber,
    ) -> Result<Option<IssueRecord>, GatewayError>;

    /// Fetches a pull request by number.
    async fn get_pull_request(
        &self,
        repository: &RepositoryRef,
        number: IssueNumber,
    ) -> Result<PullRequestRecord, GatewayError>;

    /// Creates a card in `column` linked to the given content.
    async fn create_card(
        &self,
        column: ColumnId,
        content: ContentId,
        kind: ContentKind,
    ) -> Result<Card, GatewayError>;

    /// Moves an existing card into `column` at `position`.
    async fn move_card(
        &self,
        card: CardId,
        column: ColumnId,
        position: CardPosition,
    ) -> Result<(), GatewayError>;
}
