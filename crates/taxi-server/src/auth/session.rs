//! Database-backed sessions
//!
//! A session binds a random 32 character key (the `sessionid` cookie value)
//! to a driver until `expires_at`. Expired rows are treated as absent and
//! swept whenever a new session is created.

use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::models::{Driver, DRIVER_COLUMNS};

const SESSION_KEY_LENGTH: usize = 32;

/// An authenticated request's session and the driver behind it
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub session_key: String,
    pub driver: Driver,
}

fn generate_session_key() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_KEY_LENGTH)
        .map(char::from)
        .collect()
}

/// Open a new session for `driver_id` lasting `age_secs` seconds
#[tracing::instrument(skip(pool))]
pub async fn create(pool: &SqlitePool, driver_id: i64, age_secs: i64) -> sqlx::Result<String> {
    let now = Utc::now().timestamp();

    let swept = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
        .bind(now)
        .execute(pool)
        .await?
        .rows_affected();
    if swept > 0 {
        tracing::debug!(swept, "Removed expired sessions");
    }

    let session_key = generate_session_key();
    sqlx::query("INSERT INTO sessions (session_key, driver_id, expires_at) VALUES (?, ?, ?)")
        .bind(&session_key)
        .bind(driver_id)
        .bind(now + age_secs)
        .execute(pool)
        .await?;

    Ok(session_key)
}

/// Resolve a cookie value to a live session, if any
pub async fn load(pool: &SqlitePool, session_key: &str) -> sqlx::Result<Option<AuthSession>> {
    let sql = format!(
        "SELECT {} FROM drivers WHERE id = (\
             SELECT driver_id FROM sessions WHERE session_key = ? AND expires_at > ?\
         )",
        DRIVER_COLUMNS
    );

    let driver = sqlx::query_as::<_, Driver>(&sql)
        .bind(session_key)
        .bind(Utc::now().timestamp())
        .fetch_optional(pool)
        .await?;

    Ok(driver.map(|driver| AuthSession {
        session_key: session_key.to_string(),
        driver,
    }))
}

/// Remove a session; unknown keys are ignored
pub async fn delete(pool: &SqlitePool, session_key: &str) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM sessions WHERE session_key = ?")
        .bind(session_key)
        .execute(pool)
        .await?;
    Ok(())
}

/// Bump the visit counter and return the new value
pub async fn record_visit(pool: &SqlitePool, session_key: &str) -> sqlx::Result<i64> {
    let visits: Option<i64> = sqlx::query_scalar(
        "UPDATE sessions SET num_visits = num_visits + 1 WHERE session_key = ? RETURNING num_visits",
    )
    .bind(session_key)
    .fetch_optional(pool)
    .await?;

    Ok(visits.unwrap_or(0))
}
