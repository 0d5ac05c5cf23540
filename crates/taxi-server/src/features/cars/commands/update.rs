use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::create::{invalid_manufacturer, manufacturer_exists, validate_car_fields};
use crate::features::shared::{
    error_helpers::map_foreign_key_violation, validation::FieldErrors,
};
use crate::models::{Car, CarSummary};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCarCommand {
    #[serde(skip)]
    pub id: i64,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub manufacturer: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateCarError {
    #[error("Invalid car: {0}")]
    Validation(FieldErrors),
    #[error("Car {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Car, UpdateCarError>> for UpdateCarCommand {}

impl crate::cqrs::middleware::Command for UpdateCarCommand {}

impl UpdateCarCommand {
    pub fn validate(&self) -> Result<i64, FieldErrors> {
        validate_car_fields(&self.model, &self.manufacturer)
    }
}

impl From<&CarSummary> for UpdateCarCommand {
    fn from(car: &CarSummary) -> Self {
        Self {
            id: car.id,
            model: car.model.clone(),
            manufacturer: car.manufacturer.id.to_string(),
        }
    }
}

#[tracing::instrument(skip(pool, command), fields(car_id = command.id))]
pub async fn handle(pool: SqlitePool, command: UpdateCarCommand) -> Result<Car, UpdateCarError> {
    let manufacturer_id = command.validate().map_err(UpdateCarError::Validation)?;
    if !manufacturer_exists(&pool, manufacturer_id).await? {
        return Err(UpdateCarError::Validation(invalid_manufacturer()));
    }

    let updated = sqlx::query_as::<_, Car>(
        r#"
        UPDATE cars
        SET model = ?, manufacturer_id = ?
        WHERE id = ?
        RETURNING id, model, manufacturer_id
        "#,
    )
    .bind(command.model.trim())
    .bind(manufacturer_id)
    .bind(command.id)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        map_foreign_key_violation(
            e,
            UpdateCarError::Validation(invalid_manufacturer()),
            UpdateCarError::Database,
        )
    })?;

    updated.ok_or(UpdateCarError::NotFound(command.id))
}
