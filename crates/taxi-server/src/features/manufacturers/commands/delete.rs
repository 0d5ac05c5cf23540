use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::features::shared::error_helpers::map_foreign_key_violation;
use crate::models::Manufacturer;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteManufacturerCommand {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteManufacturerError {
    #[error("Manufacturer {0} not found")]
    NotFound(i64),
    #[error("Cannot delete manufacturer {0}: it still has cars")]
    HasDependencies(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Manufacturer, DeleteManufacturerError>> for DeleteManufacturerCommand {}

impl crate::cqrs::middleware::Command for DeleteManufacturerCommand {}

/// Delete a manufacturer that no car references any more
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: SqlitePool,
    command: DeleteManufacturerCommand,
) -> Result<Manufacturer, DeleteManufacturerError> {
    let deleted = sqlx::query_as::<_, Manufacturer>(
        "DELETE FROM manufacturers WHERE id = ? RETURNING id, name, country",
    )
    .bind(command.id)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        map_foreign_key_violation(
            e,
            DeleteManufacturerError::HasDependencies(command.id),
            DeleteManufacturerError::Database,
        )
    })?;

    deleted.ok_or(DeleteManufacturerError::NotFound(command.id))
}
