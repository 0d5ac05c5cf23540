use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::features::shared::{InvalidPage, ListPage, PageObj, SearchFilter};
use crate::models::{CarSummary, CAR_SUMMARY_SELECT};

pub const CAR_LIST_PATH: &str = "/cars/";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListCarsQuery {
    /// Case-insensitive substring of the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(skip)]
    pub per_page: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum ListCarsError {
    #[error("Invalid page: {0}")]
    InvalidPage(#[from] InvalidPage),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<ListPage<CarSummary>, ListCarsError>> for ListCarsQuery {}

impl crate::cqrs::middleware::Query for ListCarsQuery {}

/// Cars with their manufacturer, in insertion order
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: SqlitePool,
    query: ListCarsQuery,
) -> Result<ListPage<CarSummary>, ListCarsError> {
    let search = SearchFilter::new("model", query.model.as_deref());
    let pattern = search.like_pattern();
    let where_clause = search.where_clause("c.model");

    let count_sql = format!("SELECT COUNT(*) FROM cars c {}", where_clause);
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    if let Some(pattern) = &pattern {
        count_query = count_query.bind(pattern.as_str());
    }
    let count = count_query.fetch_one(&pool).await?;

    let page_obj = PageObj::resolve(query.page.as_deref(), count, query.per_page)?;

    let list_sql = format!(
        "{} {} ORDER BY c.id LIMIT ? OFFSET ?",
        CAR_SUMMARY_SELECT, where_clause
    );
    let mut list_query = sqlx::query_as::<_, CarSummary>(&list_sql);
    if let Some(pattern) = &pattern {
        list_query = list_query.bind(pattern.as_str());
    }
    let items = list_query
        .bind(page_obj.per_page)
        .bind(page_obj.offset())
        .fetch_all(&pool)
        .await?;

    Ok(ListPage {
        list_key: "car_list",
        path: CAR_LIST_PATH,
        items,
        page_obj,
        search,
    })
}
