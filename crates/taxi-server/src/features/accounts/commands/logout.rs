use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::auth::session;

/// End a session; an unknown or missing key is not an error
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoutCommand {
    pub session_key: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum LogoutError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<(), LogoutError>> for LogoutCommand {}

impl crate::cqrs::middleware::Command for LogoutCommand {}

#[tracing::instrument(skip(pool, command))]
pub async fn handle(pool: SqlitePool, command: LogoutCommand) -> Result<(), LogoutError> {
    if let Some(session_key) = command.session_key {
        session::delete(&pool, &session_key).await?;
        tracing::info!("Session closed");
    }
    Ok(())
}
