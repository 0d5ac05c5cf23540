use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::models::{Driver, DRIVER_COLUMNS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDriverCommand {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteDriverError {
    #[error("Driver {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Driver, DeleteDriverError>> for DeleteDriverCommand {}

impl crate::cqrs::middleware::Command for DeleteDriverCommand {}

/// Delete a driver along with their sessions and car assignments
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: SqlitePool,
    command: DeleteDriverCommand,
) -> Result<Driver, DeleteDriverError> {
    let sql = format!("DELETE FROM drivers WHERE id = ? RETURNING {}", DRIVER_COLUMNS);
    let driver = sqlx::query_as::<_, Driver>(&sql)
        .bind(command.id)
        .fetch_optional(&pool)
        .await?
        .ok_or(DeleteDriverError::NotFound(command.id))?;

    tracing::info!(driver = %driver, "Driver deleted");
    Ok(driver)
}
