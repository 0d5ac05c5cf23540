//! Create driver command
//!
//! A driver is also a login identity, so creating one means choosing a
//! username and password as well as the license details.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::auth::password::hash_password;
use crate::features::shared::{
    error_helpers::is_unique_violation,
    validation::{
        validate_license_number, validate_max_length, validate_password_pair, validate_username,
        FieldErrors, PERSON_NAME_MAX_LENGTH,
    },
};
use crate::models::{Driver, DRIVER_COLUMNS};

pub const DUPLICATE_USERNAME_MESSAGE: &str = "A user with that username already exists.";

/// Command to register a new driver
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateDriverCommand {
    pub username: String,
    #[serde(skip_serializing)]
    pub password1: String,
    #[serde(skip_serializing)]
    pub password2: String,
    pub first_name: String,
    pub last_name: String,
    pub license_number: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateDriverError {
    #[error("Invalid driver: {0}")]
    Validation(FieldErrors),

    #[error("Password hashing failed: {0}")]
    Password(#[from] taxi_common::TaxiError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Driver, CreateDriverError>> for CreateDriverCommand {}

impl crate::cqrs::middleware::Command for CreateDriverCommand {}

impl CreateDriverCommand {
    /// Validates every field without touching the store
    ///
    /// # Errors
    ///
    /// - username: required, at most 150 characters, letters, digits and `@.+-_`
    /// - password1/password2: required, equal, at least 8 characters, not all digits
    /// - first_name/last_name: at most 150 characters
    /// - license_number: two uppercase letters then six digits
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("username", validate_username(&self.username));
        validate_password_pair(&mut errors, &self.password1, &self.password2);
        errors.check("first_name", validate_max_length(&self.first_name, PERSON_NAME_MAX_LENGTH));
        errors.check("last_name", validate_max_length(&self.last_name, PERSON_NAME_MAX_LENGTH));
        errors.check("license_number", validate_license_number(&self.license_number));
        errors.into_result(())
    }
}

async fn username_taken(pool: &SqlitePool, username: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM drivers WHERE username = ?)")
        .bind(username)
        .fetch_one(pool)
        .await
}

/// Handler function for creating drivers
///
/// Username and license number are stored exactly as submitted; the
/// password only as an Argon2 hash.
#[tracing::instrument(skip(pool, command), fields(username = %command.username))]
pub async fn handle(
    pool: SqlitePool,
    command: CreateDriverCommand,
) -> Result<Driver, CreateDriverError> {
    let mut errors = command.validate().err().unwrap_or_default();
    if !errors.contains("username") && username_taken(&pool, &command.username).await? {
        errors.add("username", DUPLICATE_USERNAME_MESSAGE);
    }
    if !errors.is_empty() {
        return Err(CreateDriverError::Validation(errors));
    }

    let password_hash = hash_password(&command.password1)?;

    let sql = format!(
        "INSERT INTO drivers (username, password, first_name, last_name, license_number) \
         VALUES (?, ?, ?, ?, ?) RETURNING {}",
        DRIVER_COLUMNS
    );
    let driver = sqlx::query_as::<_, Driver>(&sql)
        .bind(&command.username)
        .bind(&password_hash)
        .bind(&command.first_name)
        .bind(&command.last_name)
        .bind(&command.license_number)
        .fetch_one(&pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return CreateDriverError::Validation(FieldErrors::single(
                    "username",
                    DUPLICATE_USERNAME_MESSAGE,
                ));
            }
            CreateDriverError::Database(e)
        })?;

    tracing::info!(driver_id = driver.id, "Driver created successfully");

    Ok(driver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    fn command() -> CreateDriverCommand {
        CreateDriverCommand {
            username: "new_user".to_string(),
            password1: "user12test".to_string(),
            password2: "user12test".to_string(),
            first_name: "Test first".to_string(),
            last_name: "Test last".to_string(),
            license_number: "TES12345".to_string(),
        }
    }

    #[test]
    fn test_validate_rejects_bad_license() {
        let errors = command().validate().unwrap_err();
        assert!(errors.contains("license_number"));
        assert!(!errors.contains("username"));
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let cmd = CreateDriverCommand {
            username: String::new(),
            password2: "different1".to_string(),
            license_number: "123".to_string(),
            ..command()
        };
        let errors = cmd.validate().unwrap_err();
        assert!(errors.contains("username"));
        assert!(errors.contains("password2"));
        assert!(errors.contains("license_number"));
    }

    #[tokio::test]
    async fn test_handle_persists_exact_values() {
        let pool = memory_pool().await;
        let cmd = CreateDriverCommand {
            license_number: "TE123456".to_string(),
            ..command()
        };

        let driver = handle(pool.clone(), cmd.clone()).await.unwrap();
        assert_eq!(driver.username, cmd.username);
        assert_eq!(driver.first_name, cmd.first_name);
        assert_eq!(driver.last_name, cmd.last_name);
        assert_eq!(driver.license_number, "TE123456");
        assert_ne!(driver.password, cmd.password1);
        assert!(driver.check_password(&cmd.password1));
        assert!(!driver.check_password("wrong-password"));
    }

    #[tokio::test]
    async fn test_handle_invalid_persists_nothing() {
        let pool = memory_pool().await;

        let result = handle(pool.clone(), command()).await;
        assert!(matches!(result, Err(CreateDriverError::Validation(_))));
        assert_eq!(count_rows(&pool, "drivers").await, 0);
    }

    #[tokio::test]
    async fn test_handle_duplicate_username() {
        let pool = memory_pool().await;
        TestDriver::new("new_user", "AB123456").insert(&pool).await.unwrap();

        let cmd = CreateDriverCommand {
            license_number: "TE123456".to_string(),
            ..command()
        };
        match handle(pool.clone(), cmd).await {
            Err(CreateDriverError::Validation(errors)) => {
                assert_eq!(errors.get("username").unwrap(), [DUPLICATE_USERNAME_MESSAGE]);
            },
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(count_rows(&pool, "drivers").await, 1);
    }
}
