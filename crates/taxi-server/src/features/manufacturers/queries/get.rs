use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::models::Manufacturer;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetManufacturerQuery {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetManufacturerError {
    #[error("Manufacturer {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Manufacturer, GetManufacturerError>> for GetManufacturerQuery {}

impl crate::cqrs::middleware::Query for GetManufacturerQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: SqlitePool,
    query: GetManufacturerQuery,
) -> Result<Manufacturer, GetManufacturerError> {
    sqlx::query_as::<_, Manufacturer>("SELECT id, name, country FROM manufacturers WHERE id = ?")
        .bind(query.id)
        .fetch_optional(&pool)
        .await?
        .ok_or(GetManufacturerError::NotFound(query.id))
}
