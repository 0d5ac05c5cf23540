use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::create::{validate_manufacturer_fields, DUPLICATE_NAME_MESSAGE};
use crate::features::shared::{error_helpers::is_unique_violation, validation::FieldErrors};
use crate::models::Manufacturer;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateManufacturerCommand {
    /// Taken from the path, never from the form body
    #[serde(skip)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateManufacturerError {
    #[error("Invalid manufacturer: {0}")]
    Validation(FieldErrors),
    #[error("Manufacturer {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Manufacturer, UpdateManufacturerError>> for UpdateManufacturerCommand {}

impl crate::cqrs::middleware::Command for UpdateManufacturerCommand {}

impl UpdateManufacturerCommand {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        validate_manufacturer_fields(&self.name, &self.country)
    }
}

impl From<&Manufacturer> for UpdateManufacturerCommand {
    fn from(manufacturer: &Manufacturer) -> Self {
        Self {
            id: manufacturer.id,
            name: manufacturer.name.clone(),
            country: manufacturer.country.clone(),
        }
    }
}

#[tracing::instrument(skip(pool, command), fields(manufacturer_id = command.id))]
pub async fn handle(
    pool: SqlitePool,
    command: UpdateManufacturerCommand,
) -> Result<Manufacturer, UpdateManufacturerError> {
    command.validate().map_err(UpdateManufacturerError::Validation)?;

    let updated = sqlx::query_as::<_, Manufacturer>(
        r#"
        UPDATE manufacturers
        SET name = ?, country = ?
        WHERE id = ?
        RETURNING id, name, country
        "#,
    )
    .bind(command.name.trim())
    .bind(command.country.trim())
    .bind(command.id)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            return UpdateManufacturerError::Validation(FieldErrors::single(
                "name",
                DUPLICATE_NAME_MESSAGE,
            ));
        }
        UpdateManufacturerError::Database(e)
    })?;

    let manufacturer = updated.ok_or(UpdateManufacturerError::NotFound(command.id))?;
    tracing::info!("Manufacturer updated");
    Ok(manufacturer)
}
