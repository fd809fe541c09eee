//! Owner classification: organization or individual account.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::{BoardError, OwnerFallback, OwnerLogin, ProjectBoardGateway, ProjectLocation, ProjectScope};

/// Result of probing whether a login names an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OwnerKind {
    Organization,
    Individual,
    /// The probe failed for a reason other than "not found".
    Unknown { reason: String },
}

/// Probes `owner` as an organization.
///
/// A successful lookup means [`OwnerKind::Organization`]; a definitive
/// not-found means [`OwnerKind::Individual`]. Any other failure is reported as
/// [`OwnerKind::Unknown`] and never as an error; the caller decides what that
/// means.
#[instrument(skip(gateway), fields(owner = %owner))]
pub async fn classify_owner<G>(gateway: &G, owner: &OwnerLogin) -> OwnerKind
where
    G: ProjectBoardGateway + ?Sized,
{
    match gateway.get_organization(owner).await {
        Ok(()) => OwnerKind::Organization,
        Err(err) if err.is_not_found() => {
            debug!(error = %err, "owner is not an organization");
            OwnerKind::Individual
        }
        Err(err) => {
            warn!(error = %err, "organization lookup failed; owner kind unknown");
            OwnerKind::Unknown {
                reason: err.to_string(),
            }
        }
    }
}

/// Turns a location into the concrete project listing scope.
///
/// Repository locations need no classification. Owner locations are
/// classified, and an [`OwnerKind::Unknown`] result is settled by `fallback`.
///
/// # Errors
///
/// [`BoardError::OwnerUnclassified`] when the owner kind is unknown and
/// `fallback` is [`OwnerFallback::Fail`].
pub async fn resolve_scope<G>(
    gateway: &G,
    location: &ProjectLocation,
    fallback: OwnerFallback,
) -> Result<ProjectScope, BoardError>
where
    G: ProjectBoardGateway + ?Sized,
{
    let owner = match location {
        ProjectLocation::Repository(repo) => return Ok(ProjectScope::Repository(repo.clone())),
        ProjectLocation::Owner(owner) => owner,
    };
    match classify_owner(gateway, owner).await {
        OwnerKind::Organization => Ok(ProjectScope::Organization(owner.clone())),
        OwnerKind::Individual => Ok(ProjectScope::User(owner.clone())),
        OwnerKind::Unknown { reason } => match fallback {
            OwnerFallback::Individual => {
                warn!(%owner, "treating unclassified owner as an individual account");
                Ok(ProjectScope::User(owner.clone()))
            }
            OwnerFallback::Fail => Err(BoardError::OwnerUnclassified {
                owner: owner.clone(),
                reason,
            }),
        },
    }
}
