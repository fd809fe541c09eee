//! Content resolution: repository + number to a normalised [`Content`].

use tracing::{debug, instrument};

use crate::{BoardError, Content, ContentKind, IssueNumber, ProjectBoardGateway, RepositoryRef, Resource};

/// Resolves `number` in `repository` to the issue or pull request it names.
///
/// The issue record is always fetched first since issues and pull requests
/// share one numbering sequence. When it carries pull-request linkage the
/// pull request is fetched too and its own record identifier is reported.
/// The URL is taken from the issue record in both cases.
///
/// # Errors
///
/// [`BoardError::NotFound`] if the repository has no such number, or any
/// gateway error.
#[instrument(skip(gateway), fields(repository = %repository, number = %number))]
pub async fn resolve_content<G>(
    gateway: &G,
    repository: &RepositoryRef,
    number: IssueNumber,
) -> Result<Content, BoardError>
where
    G: ProjectBoardGateway + ?Sized,
{
    let issue = gateway.get_issue(repository, number).await?.ok_or_else(|| {
        BoardError::not_found(Resource::Content, format!("#{number} in {repository}"))
    })?;

    let content = if issue.is_pull_request {
        let pull = gateway.get_pull_request(repository, number).await?;
        Content {
            id: pull.id,
            url: issue.url,
            kind: ContentKind::PullRequest,
        }
    } else {
        Content {
            id: issue.id,
            url: issue.url,
            kind: ContentKind::Issue,
        }
    };
    debug!(id = %content.id, kind = %content.kind, url = %content.url, "resolved content");
    Ok(content)
}
