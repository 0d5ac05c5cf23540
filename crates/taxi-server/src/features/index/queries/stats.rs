use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::auth::session;

/// Home page counters
///
/// Reading them also counts a visit on the caller's session, so this is the
/// one query that writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetIndexStatsQuery {
    pub session_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub num_drivers: i64,
    pub num_cars: i64,
    pub num_manufacturers: i64,
    pub num_visits: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetIndexStatsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<IndexStats, GetIndexStatsError>> for GetIndexStatsQuery {}

impl crate::cqrs::middleware::Query for GetIndexStatsQuery {}

#[tracing::instrument(skip(pool, query))]
pub async fn handle(
    pool: SqlitePool,
    query: GetIndexStatsQuery,
) -> Result<IndexStats, GetIndexStatsError> {
    let num_visits = session::record_visit(&pool, &query.session_key).await?;

    let (num_drivers, num_cars, num_manufacturers): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            (SELECT COUNT(*) FROM drivers),
            (SELECT COUNT(*) FROM cars),
            (SELECT COUNT(*) FROM manufacturers)
        "#,
    )
    .fetch_one(&pool)
    .await?;

    Ok(IndexStats {
        num_drivers,
        num_cars,
        num_manufacturers,
        num_visits,
    })
}
