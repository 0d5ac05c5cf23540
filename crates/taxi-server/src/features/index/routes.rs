use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Router,
};
use sqlx::SqlitePool;

use super::queries::{GetIndexStatsError, GetIndexStatsQuery};
use crate::api::response::{ApiResponse, ErrorResponse};
use crate::auth::AuthSession;
use crate::features::AppState;

pub fn index_routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}

#[tracing::instrument(skip(pool, session), fields(driver_id = session.driver.id))]
async fn index(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<AuthSession>,
) -> Result<Response, GetIndexStatsError> {
    let query = GetIndexStatsQuery {
        session_key: session.session_key,
    };
    let stats = super::queries::stats::handle(pool, query).await?;
    Ok(ApiResponse::success(stats).into_response())
}

impl IntoResponse for GetIndexStatsError {
    fn into_response(self) -> Response {
        tracing::error!("Database error in index endpoint: {}", self);
        ErrorResponse::internal("A database error occurred")
    }
}
