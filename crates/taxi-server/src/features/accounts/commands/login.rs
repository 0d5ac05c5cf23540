//! Log in command
//!
//! Checks a username/password pair and opens a session for the driver. A
//! failed attempt never says which of the two was wrong.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::auth::session;
use crate::features::shared::validation::{FieldErrors, NON_FIELD_ERRORS};
use crate::models::{Driver, DRIVER_COLUMNS};

pub const INVALID_LOGIN_MESSAGE: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

const REQUIRED_MESSAGE: &str = "This field is required.";

/// Where a successful login goes when `next` is missing or unsafe
pub const DEFAULT_REDIRECT: &str = "/";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginCommand {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    /// Path to continue to after logging in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip)]
    pub session_age_secs: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub session_key: String,
    pub driver: Driver,
    pub redirect_to: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Login failed: {0}")]
    Validation(FieldErrors),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<LoginResponse, LoginError>> for LoginCommand {}

impl crate::cqrs::middleware::Command for LoginCommand {}

impl LoginCommand {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.username.is_empty() {
            errors.add("username", REQUIRED_MESSAGE);
        }
        if self.password.is_empty() {
            errors.add("password", REQUIRED_MESSAGE);
        }
        errors.into_result(())
    }

    pub fn redirect_target(&self) -> String {
        safe_next_url(self.next.as_deref()).to_string()
    }
}

/// Accept only local absolute paths as redirect targets
///
/// Browsers drop tabs and newlines from URLs, so `/\t/host` would become
/// `//host`; any control character rejects the target.
pub fn safe_next_url(next: Option<&str>) -> &str {
    match next {
        Some(url)
            if url.starts_with('/')
                && !url.starts_with("//")
                && !url.contains('\\')
                && !url.chars().any(char::is_control) =>
        {
            url
        },
        _ => DEFAULT_REDIRECT,
    }
}

#[tracing::instrument(skip(pool, command), fields(username = %command.username))]
pub async fn handle(pool: SqlitePool, command: LoginCommand) -> Result<LoginResponse, LoginError> {
    command.validate().map_err(LoginError::Validation)?;

    let sql = format!("SELECT {} FROM drivers WHERE username = ?", DRIVER_COLUMNS);
    let driver = sqlx::query_as::<_, Driver>(&sql)
        .bind(&command.username)
        .fetch_optional(&pool)
        .await?
        .filter(|driver| driver.check_password(&command.password));

    let Some(driver) = driver else {
        tracing::warn!("Rejected login attempt");
        return Err(LoginError::Validation(FieldErrors::single(
            NON_FIELD_ERRORS,
            INVALID_LOGIN_MESSAGE,
        )));
    };

    let session_key = session::create(&pool, driver.id, command.session_age_secs).await?;
    tracing::info!(driver_id = driver.id, "Driver logged in");

    Ok(LoginResponse {
        session_key,
        redirect_to: command.redirect_target(),
        driver,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    fn command(username: &str, password: &str) -> LoginCommand {
        LoginCommand {
            username: username.to_string(),
            password: password.to_string(),
            next: None,
            session_age_secs: 3600,
        }
    }

    #[test]
    fn test_safe_next_url() {
        assert_eq!(safe_next_url(Some("/drivers/")), "/drivers/");
        assert_eq!(safe_next_url(Some("/cars/?page=2")), "/cars/?page=2");
        assert_eq!(safe_next_url(Some("https://evil.example/")), "/");
        assert_eq!(safe_next_url(Some("//evil.example/")), "/");
        assert_eq!(safe_next_url(Some("/\\evil.example")), "/");
        assert_eq!(safe_next_url(Some("/\t/evil.example/")), "/");
        assert_eq!(safe_next_url(Some("/\n/evil.example/")), "/");
        assert_eq!(safe_next_url(Some("/cars/\r\nSet-Cookie: x=1")), "/");
        assert_eq!(safe_next_url(None), "/");
    }

    #[tokio::test]
    async fn test_handle_opens_session() {
        let pool = memory_pool().await;
        let driver = TestDriver::new("john_driver", "AB123456").insert(&pool).await.unwrap();

        let mut cmd = command("john_driver", TEST_PASSWORD);
        cmd.next = Some("/drivers/".to_string());
        let response = handle(pool.clone(), cmd).await.unwrap();

        assert_eq!(response.driver.id, driver.id);
        assert_eq!(response.redirect_to, "/drivers/");
        let session = session::load(&pool, &response.session_key).await.unwrap();
        assert_eq!(session.unwrap().driver.id, driver.id);
    }

    #[tokio::test]
    async fn test_handle_rejects_bad_credentials() {
        let pool = memory_pool().await;
        TestDriver::new("john_driver", "AB123456").insert(&pool).await.unwrap();

        for (username, password) in [("john_driver", "wrong-password"), ("nobody", TEST_PASSWORD)] {
            match handle(pool.clone(), command(username, password)).await {
                Err(LoginError::Validation(errors)) => {
                    assert_eq!(errors.get(NON_FIELD_ERRORS).unwrap(), [INVALID_LOGIN_MESSAGE]);
                },
                other => panic!("expected validation error, got {:?}", other),
            }
        }
        assert_eq!(count_rows(&pool, "sessions").await, 0);
    }

    #[tokio::test]
    async fn test_handle_requires_fields() {
        let pool = memory_pool().await;
        let result = handle(pool, command("", "")).await;
        assert!(
            matches!(result, Err(LoginError::Validation(e)) if e.contains("username") && e.contains("password"))
        );
    }
}
