//! Project resolution: location + selector to a concrete project.
//!
//! Two strategies implement [`ProjectResolver`]:
//!
//! | Strategy | Number selector | Name selector |
//! |----------|-----------------|---------------|
//! | [`ListingResolver`] | exact match over every listed project | exact match over every listed project |
//! | [`QueryResolver`] | exact lookup by number | fuzzy title search, first hit wins |
//!
//! The listing strategy is the default. The query strategy issues fewer
//! calls but its name path can select a project whose title merely contains
//! the requested text.

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::{
    owner::resolve_scope, pagination, BoardError, OwnerFallback, Project, ProjectBoardGateway,
    ProjectLocation, ProjectSelector, ResolutionStrategy, Resource, PAGE_SIZE,
};

/// Resolves a location and selector to one project.
#[async_trait]
pub trait ProjectResolver: Send + Sync {
    /// # Errors
    ///
    /// [`BoardError::NotFound`] when no project matches, or any gateway error.
    async fn resolve(
        &self,
        gateway: &dyn ProjectBoardGateway,
        location: &ProjectLocation,
        selector: &ProjectSelector,
    ) -> Result<Project, BoardError>;
}

/// Returns the resolver implementing `strategy`.
pub fn resolver_for(strategy: ResolutionStrategy, fallback: OwnerFallback) -> Box<dyn ProjectResolver> {
    match strategy {
        ResolutionStrategy::Listing => Box::new(ListingResolver::new(fallback)),
        ResolutionStrategy::Query => Box::new(QueryResolver::new(fallback)),
    }
}

/// Picks the project matching `selector` out of a complete listing.
///
/// Number and name are both compared exactly. The first match in listing
/// order wins.
pub fn select_project<'a>(projects: &'a [Project], selector: &ProjectSelector) -> Option<&'a Project> {
    projects.iter().find(|project| match selector {
        ProjectSelector::Number(number) => project.number == Some(*number),
        ProjectSelector::Name(name) => project.name.as_ref() == Some(name),
    })
}

// ---------------------------------------------------------------------------
// Listing strategy
// ---------------------------------------------------------------------------

/// Lists every project in scope, then selects by exact match.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingResolver {
    fallback: OwnerFallback,
}

impl ListingResolver {
    pub fn new(fallback: OwnerFallback) -> Self {
        Self { fallback }
    }
}

#[async_trait]
impl ProjectResolver for ListingResolver {
    #[instrument(skip(self, gateway))]
    async fn resolve(
        &self,
        gateway: &dyn ProjectBoardGateway,
        location: &ProjectLocation,
        selector: &ProjectSelector,
    ) -> Result<Project, BoardError> {
        let scope = resolve_scope(gateway, location, self.fallback).await?;
        let projects =
            pagination::collect_all(PAGE_SIZE, |page| gateway.list_projects(&scope, page)).await?;
        debug!(%scope, count = projects.len(), "listed projects");

        select_project(&projects, selector)
            .cloned()
            .ok_or_else(|| BoardError::not_found(Resource::Project, format!("{selector} in {scope}")))
    }
}

// ---------------------------------------------------------------------------
// Query strategy
// ---------------------------------------------------------------------------

/// Asks the remote system for the project directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryResolver {
    fallback: OwnerFallback,
}

impl QueryResolver {
    pub fn new(fallback: OwnerFallback) -> Self {
        Self { fallback }
    }
}

#[async_trait]
impl ProjectResolver for QueryResolver {
    #[instrument(skip(self, gateway))]
    async fn resolve(
        &self,
        gateway: &dyn ProjectBoardGateway,
        location: &ProjectLocation,
        selector: &ProjectSelector,
    ) -> Result<Project, BoardError> {
        let scope = resolve_scope(gateway, location, self.fallback).await?;
        if let ProjectSelector::Name(_) = selector {
            info!("resolving project by title search; the first search hit is used");
        }

        let project = gateway
            .query_project(&scope, selector)
            .await?
            .ok_or_else(|| BoardError::not_found(Resource::Project, format!("{selector} in {scope}")))?;

        if let ProjectSelector::Name(wanted) = selector {
            if project.name.as_ref() != Some(wanted) {
                warn!(
                    wanted = %wanted,
                    matched = ?project.name,
                    project_id = %project.id,
                    "title search matched a project with a different name"
                );
            }
        }
        Ok(project)
    }
}
