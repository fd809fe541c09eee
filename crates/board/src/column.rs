//! Column listing and matching.

use tracing::{debug, instrument};

use crate::{
    pagination, BoardError, Column, ColumnName, GatewayError, ProjectBoardGateway, ProjectId,
    Resource, PAGE_SIZE,
};

/// Lists every column of `project` in board order.
#[instrument(skip(gateway))]
pub async fn list_columns<G>(gateway: &G, project: ProjectId) -> Result<Vec<Column>, GatewayError>
where
    G: ProjectBoardGateway + ?Sized,
{
    let columns = pagination::collect_all(PAGE_SIZE, |page| gateway.list_columns(project, page)).await?;
    debug!(count = columns.len(), "listed columns");
    Ok(columns)
}

/// Returns the column named exactly `name`.
///
/// # Errors
///
/// [`BoardError::NotFound`] if no column has that name.
pub fn match_column<'a>(columns: &'a [Column], name: &ColumnName) -> Result<&'a Column, BoardError> {
    columns
        .iter()
        .find(|column| &column.name == name)
        .ok_or_else(|| BoardError::not_found(Resource::Column, format!("column '{name}'")))
}
