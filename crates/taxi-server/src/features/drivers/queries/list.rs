use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::features::shared::{InvalidPage, ListPage, PageObj, SearchFilter};
use crate::models::{Driver, DRIVER_COLUMNS};

pub const DRIVER_LIST_PATH: &str = "/drivers/";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListDriversQuery {
    /// Case-insensitive substring of the username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(skip)]
    pub per_page: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum ListDriversError {
    #[error("Invalid page: {0}")]
    InvalidPage(#[from] InvalidPage),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<ListPage<Driver>, ListDriversError>> for ListDriversQuery {}

impl crate::cqrs::middleware::Query for ListDriversQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: SqlitePool,
    query: ListDriversQuery,
) -> Result<ListPage<Driver>, ListDriversError> {
    let search = SearchFilter::new("username", query.username.as_deref());
    let pattern = search.like_pattern();
    let where_clause = search.where_clause("username");

    let count_sql = format!("SELECT COUNT(*) FROM drivers {}", where_clause);
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    if let Some(pattern) = &pattern {
        count_query = count_query.bind(pattern.as_str());
    }
    let count = count_query.fetch_one(&pool).await?;

    let page_obj = PageObj::resolve(query.page.as_deref(), count, query.per_page)?;

    let list_sql = format!(
        "SELECT {} FROM drivers {} ORDER BY username LIMIT ? OFFSET ?",
        DRIVER_COLUMNS, where_clause
    );
    let mut list_query = sqlx::query_as::<_, Driver>(&list_sql);
    if let Some(pattern) = &pattern {
        list_query = list_query.bind(pattern.as_str());
    }
    let items = list_query
        .bind(page_obj.per_page)
        .bind(page_obj.offset())
        .fetch_all(&pool)
        .await?;

    Ok(ListPage {
        list_key: "driver_list",
        path: DRIVER_LIST_PATH,
        items,
        page_obj,
        search,
    })
}
