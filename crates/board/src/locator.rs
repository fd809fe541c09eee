//! Card location: find the card already linked to a piece of content.

use tracing::{debug, instrument};

use crate::{pagination, Card, Column, ContentUrl, GatewayError, ProjectBoardGateway, PAGE_SIZE};

/// Searches every column, in order, for a card linked to `content_url`.
///
/// Each column's cards are paged through in order and compared by exact URL
/// equality. The first card found wins: later pages of the same column and
/// later columns are never requested. If several cards link to the same
/// content, the one earliest in column-then-page order is returned.
///
/// Returns `Ok(None)` when no column holds a matching card.
#[instrument(skip(gateway, columns), fields(columns = columns.len(), content_url = %content_url))]
pub async fn find_card<G>(
    gateway: &G,
    columns: &[Column],
    content_url: &ContentUrl,
) -> Result<Option<Card>, GatewayError>
where
    G: ProjectBoardGateway + ?Sized,
{
    for column in columns {
        let found = pagination::find_first(
            PAGE_SIZE,
            |page| gateway.list_cards(column.id, page),
            |card: &Card| card.links_to(content_url),
        )
        .await?;
        if let Some(card) = found {
            debug!(card_id = %card.id, column = %column.name, "found existing card");
            return Ok(Some(card));
        }
    }
    debug!("no existing card");
    Ok(None)
}
