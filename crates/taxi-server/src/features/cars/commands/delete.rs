use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::models::Car;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCarCommand {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteCarError {
    #[error("Car {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Car, DeleteCarError>> for DeleteCarCommand {}

impl crate::cqrs::middleware::Command for DeleteCarCommand {}

/// Delete a car; its driver assignments go with it
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: SqlitePool, command: DeleteCarCommand) -> Result<Car, DeleteCarError> {
    sqlx::query_as::<_, Car>("DELETE FROM cars WHERE id = ? RETURNING id, model, manufacturer_id")
        .bind(command.id)
        .fetch_optional(&pool)
        .await?
        .ok_or(DeleteCarError::NotFound(command.id))
}
