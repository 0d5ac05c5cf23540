use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::features::shared::validation::{validate_license_number, FieldErrors};
use crate::models::{Driver, DRIVER_COLUMNS};

/// Replace a driver's license number; no other field is editable here
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLicenseCommand {
    #[serde(skip)]
    pub id: i64,
    #[serde(default)]
    pub license_number: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateLicenseError {
    #[error("Invalid license number: {0}")]
    Validation(FieldErrors),
    #[error("Driver {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Driver, UpdateLicenseError>> for UpdateLicenseCommand {}

impl crate::cqrs::middleware::Command for UpdateLicenseCommand {}

impl UpdateLicenseCommand {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("license_number", validate_license_number(&self.license_number));
        errors.into_result(())
    }
}

impl From<&Driver> for UpdateLicenseCommand {
    fn from(driver: &Driver) -> Self {
        Self {
            id: driver.id,
            license_number: driver.license_number.clone(),
        }
    }
}

#[tracing::instrument(skip(pool, command), fields(driver_id = command.id))]
pub async fn handle(
    pool: SqlitePool,
    command: UpdateLicenseCommand,
) -> Result<Driver, UpdateLicenseError> {
    command.validate().map_err(UpdateLicenseError::Validation)?;

    let sql = format!(
        "UPDATE drivers SET license_number = ? WHERE id = ? RETURNING {}",
        DRIVER_COLUMNS
    );
    let driver = sqlx::query_as::<_, Driver>(&sql)
        .bind(&command.license_number)
        .bind(command.id)
        .fetch_optional(&pool)
        .await?
        .ok_or(UpdateLicenseError::NotFound(command.id))?;

    tracing::info!("Driver license number updated");
    Ok(driver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    #[tokio::test]
    async fn test_handle_updates_license_only() {
        let pool = memory_pool().await;
        let driver = TestDriver::new("john_driver", "AB123456")
            .with_name("John", "Doe")
            .insert(&pool)
            .await
            .unwrap();

        let updated = handle(
            pool,
            UpdateLicenseCommand {
                id: driver.id,
                license_number: "XY654321".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.license_number, "XY654321");
        assert_eq!(updated.first_name, "John");
        assert_eq!(updated.username, "john_driver");
    }

    #[tokio::test]
    async fn test_handle_rejects_invalid_license() {
        let pool = memory_pool().await;
        let driver = TestDriver::new("john_driver", "AB123456").insert(&pool).await.unwrap();

        for invalid in ["ABC12345", "ab123456", "AB12345", "123"] {
            let result = handle(
                pool.clone(),
                UpdateLicenseCommand {
                    id: driver.id,
                    license_number: invalid.to_string(),
                },
            )
            .await;
            assert!(
                matches!(result, Err(UpdateLicenseError::Validation(ref e)) if e.contains("license_number")),
                "{} should be rejected",
                invalid
            );
        }

        let stored: String = sqlx::query_scalar("SELECT license_number FROM drivers WHERE id = ?")
            .bind(driver.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(stored, "AB123456");
    }

    #[tokio::test]
    async fn test_handle_not_found() {
        let pool = memory_pool().await;
        let result = handle(
            pool,
            UpdateLicenseCommand {
                id: 11,
                license_number: "AB123456".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(UpdateLicenseError::NotFound(11))));
    }
}
