//! Create car command
//!
//! The manufacturer arrives as the raw form value so that a missing or
//! malformed choice becomes a field error instead of a rejected request.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::features::shared::{
    error_helpers::map_foreign_key_violation,
    validation::{validate_name, FieldErrors},
};
use crate::models::Car;

pub const CAR_MODEL_MAX_LENGTH: usize = 255;
pub const INVALID_CHOICE_MESSAGE: &str =
    "Select a valid choice. That choice is not one of the available choices.";
const REQUIRED_MESSAGE: &str = "This field is required.";

/// Command to create a new car
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCarCommand {
    #[serde(default)]
    pub model: String,

    /// Manufacturer id as submitted
    #[serde(default)]
    pub manufacturer: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateCarError {
    #[error("Invalid car: {0}")]
    Validation(FieldErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Car, CreateCarError>> for CreateCarCommand {}

impl crate::cqrs::middleware::Command for CreateCarCommand {}

impl CreateCarCommand {
    /// Validates the form and returns the chosen manufacturer id
    pub fn validate(&self) -> Result<i64, FieldErrors> {
        validate_car_fields(&self.model, &self.manufacturer)
    }
}

pub(crate) fn validate_car_fields(model: &str, manufacturer: &str) -> Result<i64, FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.check("model", validate_name(model, CAR_MODEL_MAX_LENGTH));

    let manufacturer = manufacturer.trim();
    let manufacturer_id = if manufacturer.is_empty() {
        errors.add("manufacturer", REQUIRED_MESSAGE);
        None
    } else {
        match manufacturer.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                errors.add("manufacturer", INVALID_CHOICE_MESSAGE);
                None
            },
        }
    };

    match manufacturer_id {
        Some(id) if errors.is_empty() => Ok(id),
        _ => Err(errors),
    }
}

/// The chosen manufacturer must exist before a car can point at it
pub(crate) async fn manufacturer_exists(
    pool: &SqlitePool,
    manufacturer_id: i64,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM manufacturers WHERE id = ?)")
        .bind(manufacturer_id)
        .fetch_one(pool)
        .await
}

pub(crate) fn invalid_manufacturer() -> FieldErrors {
    FieldErrors::single("manufacturer", INVALID_CHOICE_MESSAGE)
}

#[tracing::instrument(skip(pool, command), fields(model = %command.model))]
pub async fn handle(pool: SqlitePool, command: CreateCarCommand) -> Result<Car, CreateCarError> {
    let manufacturer_id = command.validate().map_err(CreateCarError::Validation)?;
    if !manufacturer_exists(&pool, manufacturer_id).await? {
        return Err(CreateCarError::Validation(invalid_manufacturer()));
    }

    let car = sqlx::query_as::<_, Car>(
        "INSERT INTO cars (model, manufacturer_id) VALUES (?, ?) RETURNING id, model, manufacturer_id",
    )
    .bind(command.model.trim())
    .bind(manufacturer_id)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        map_foreign_key_violation(
            e,
            CreateCarError::Validation(invalid_manufacturer()),
            CreateCarError::Database,
        )
    })?;

    tracing::info!(car_id = car.id, manufacturer_id, "Car created successfully");
    Ok(car)
}
