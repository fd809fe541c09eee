//! The reconciliation state machine.
//!
//! ```text
//! NoCard            --create-->  Created
//! CardWrongColumn   --move---->  Moved
//! CardRightColumn   ---------->  Unchanged
//! ```
//!
//! The single mutating call (create or move) is always the last remote call
//! of a run, so a failure anywhere earlier leaves the board untouched.

use tracing::{info, instrument};

use crate::{
    column::{list_columns, match_column},
    content::resolve_content,
    locator::find_card,
    project::{resolver_for, ProjectResolver},
    BoardError, Card, CardPosition, Column, OwnerFallback, ProjectBoardGateway, ReconcileOutcome,
    ReconcileRequest, ResolutionStrategy, Transition,
};

/// Where the run starts once the existing card (if any) is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardState {
    NoCard,
    CardWrongColumn(Card),
    CardRightColumn(Card),
}

impl CardState {
    /// Compares the located card against the target column.
    ///
    /// Columns are compared by URL because that is the only reference a card
    /// carries to its column.
    pub fn classify(existing: Option<Card>, target: &Column) -> Self {
        match existing {
            None => Self::NoCard,
            Some(card) if card.column_url == target.url => Self::CardRightColumn(card),
            Some(card) => Self::CardWrongColumn(card),
        }
    }
}

/// Ensures exactly one card for the requested content sits in the requested
/// column.
pub struct Reconciler<G> {
    gateway: G,
    resolver: Box<dyn ProjectResolver>,
    position: CardPosition,
}

impl<G> Reconciler<G>
where
    G: ProjectBoardGateway,
{
    /// Creates a reconciler resolving projects with `strategy`.
    pub fn new(gateway: G, strategy: ResolutionStrategy, fallback: OwnerFallback) -> Self {
        Self::with_resolver(gateway, resolver_for(strategy, fallback))
    }

    /// Creates a reconciler with an explicit project resolver.
    pub fn with_resolver(gateway: G, resolver: Box<dyn ProjectResolver>) -> Self {
        Self {
            gateway,
            resolver,
            position: CardPosition::Top,
        }
    }

    /// Returns the gateway this reconciler issues calls through.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Runs one reconciliation.
    ///
    /// # Errors
    ///
    /// Any [`BoardError`] from a resolution step. The first failure aborts the
    /// run; nothing is retried and nothing is rolled back.
    #[instrument(skip(self, request), fields(
        location = ?request.location,
        selector = %request.selector,
        column = %request.column,
        repository = %request.repository,
        number = %request.issue_number,
    ))]
    pub async fn reconcile(&self, request: &ReconcileRequest) -> Result<ReconcileOutcome, BoardError> {
        let project = self
            .resolver
            .resolve(&self.gateway, &request.location, &request.selector)
            .await?;

        let columns = list_columns(&self.gateway, project.id).await?;
        let target = match_column(&columns, &request.column)?;

        let content = resolve_content(&self.gateway, &request.repository, request.issue_number).await?;

        let existing = find_card(&self.gateway, &columns, &content.url).await?;

        let (card_id, transition) = match CardState::classify(existing, target) {
            CardState::NoCard => {
                info!(
                    "Creating card associated with {} #{}",
                    content.kind, request.issue_number
                );
                let card = self
                    .gateway
                    .create_card(target.id, content.id, content.kind)
                    .await?;
                (card.id, Transition::Created)
            }
            CardState::CardWrongColumn(card) => {
                info!(
                    "An existing card is already associated with {} #{}",
                    content.kind, request.issue_number
                );
                info!("Moving card to column '{}'", target.name);
                self.gateway.move_card(card.id, target.id, self.position).await?;
                (card.id, Transition::Moved)
            }
            CardState::CardRightColumn(card) => {
                info!(
                    "An existing card is already associated with {} #{}",
                    content.kind, request.issue_number
                );
                (card.id, Transition::Unchanged)
            }
        };

        Ok(ReconcileOutcome {
            card_id,
            transition,
            content_kind: content.kind,
        })
    }
}
