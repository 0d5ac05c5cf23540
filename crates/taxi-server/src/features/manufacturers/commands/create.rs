//! Create manufacturer command
//!
//! - Command: the submitted form fields, validated as a whole
//! - Handler: standalone async function with the insert inline
//!
//! Name uniqueness is checked by the store; a violation comes back as a
//! field error on `name`, the same as any other invalid input.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::features::shared::{
    error_helpers::is_unique_violation,
    validation::{validate_name, FieldErrors},
};
use crate::models::Manufacturer;

pub const MANUFACTURER_FIELD_MAX_LENGTH: usize = 255;
pub const DUPLICATE_NAME_MESSAGE: &str = "Manufacturer with this Name already exists.";

/// Command to create a new manufacturer
///
/// # Examples
///
/// ```rust,ignore
/// use taxi_server::features::manufacturers::commands::CreateManufacturerCommand;
///
/// let command = CreateManufacturerCommand {
///     name: "Tesla".to_string(),
///     country: "USA".to_string(),
/// };
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateManufacturerCommand {
    /// Unique display name
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub country: String,
}

/// Errors that can occur when creating a manufacturer
#[derive(Debug, thiserror::Error)]
pub enum CreateManufacturerError {
    #[error("Invalid manufacturer: {0}")]
    Validation(FieldErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Manufacturer, CreateManufacturerError>> for CreateManufacturerCommand {}

impl crate::cqrs::middleware::Command for CreateManufacturerCommand {}

impl CreateManufacturerCommand {
    /// Validates the command parameters
    ///
    /// # Errors
    ///
    /// Every failing field is reported:
    /// - name is required, at most 255 characters
    /// - country is required, at most 255 characters
    pub fn validate(&self) -> Result<(), FieldErrors> {
        validate_manufacturer_fields(&self.name, &self.country)
    }
}

pub(crate) fn validate_manufacturer_fields(name: &str, country: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.check("name", validate_name(name, MANUFACTURER_FIELD_MAX_LENGTH));
    errors.check("country", validate_name(country, MANUFACTURER_FIELD_MAX_LENGTH));
    errors.into_result(())
}

/// Handler function for creating manufacturers
///
/// # Errors
///
/// - `Validation` if a field is invalid or the name is taken
/// - `Database` if the insert fails for any other reason
#[tracing::instrument(skip(pool, command), fields(name = %command.name))]
pub async fn handle(
    pool: SqlitePool,
    command: CreateManufacturerCommand,
) -> Result<Manufacturer, CreateManufacturerError> {
    command.validate().map_err(CreateManufacturerError::Validation)?;

    let manufacturer = sqlx::query_as::<_, Manufacturer>(
        r#"
        INSERT INTO manufacturers (name, country)
        VALUES (?, ?)
        RETURNING id, name, country
        "#,
    )
    .bind(command.name.trim())
    .bind(command.country.trim())
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            return CreateManufacturerError::Validation(FieldErrors::single(
                "name",
                DUPLICATE_NAME_MESSAGE,
            ));
        }
        CreateManufacturerError::Database(e)
    })?;

    tracing::info!(manufacturer_id = manufacturer.id, "Manufacturer created successfully");

    Ok(manufacturer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    fn command(name: &str, country: &str) -> CreateManufacturerCommand {
        CreateManufacturerCommand {
            name: name.to_string(),
            country: country.to_string(),
        }
    }

    #[test]
    fn test_validation_success() {
        assert!(command("Tesla", "USA").validate().is_ok());
    }

    #[test]
    fn test_validation_reports_every_field() {
        let errors = command("", " ").validate().unwrap_err();
        assert!(errors.contains("name"));
        assert!(errors.contains("country"));
    }

    #[test]
    fn test_validation_name_too_long() {
        let errors = command(&"a".repeat(256), "USA").validate().unwrap_err();
        assert!(errors.contains("name"));
        assert!(!errors.contains("country"));
    }

    #[tokio::test]
    async fn test_handle_creates_manufacturer() {
        let pool = memory_pool().await;

        let created = handle(pool.clone(), command("  Tesla ", "USA")).await.unwrap();
        assert_eq!(created.name, "Tesla");
        assert_eq!(created.to_string(), "Tesla USA");
        assert_eq!(count_rows(&pool, "manufacturers").await, 1);
    }

    #[tokio::test]
    async fn test_handle_duplicate_name() {
        let pool = memory_pool().await;
        TestManufacturer::new("Tesla", "USA").insert(&pool).await.unwrap();

        let result = handle(pool.clone(), command("Tesla", "Germany")).await;
        match result {
            Err(CreateManufacturerError::Validation(errors)) => {
                assert_eq!(errors.get("name"), Some(&[DUPLICATE_NAME_MESSAGE.to_string()][..]));
            },
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(count_rows(&pool, "manufacturers").await, 1);
    }

    #[tokio::test]
    async fn test_handle_invalid_persists_nothing() {
        let pool = memory_pool().await;
        let result = handle(pool.clone(), command("", "USA")).await;
        assert!(matches!(result, Err(CreateManufacturerError::Validation(_))));
        assert_eq!(count_rows(&pool, "manufacturers").await, 0);
    }
}
