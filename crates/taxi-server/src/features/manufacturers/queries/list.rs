use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::features::shared::{InvalidPage, ListPage, PageObj, SearchFilter};
use crate::models::Manufacturer;

pub const MANUFACTURER_LIST_PATH: &str = "/manufacturers/";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListManufacturersQuery {
    /// Case-insensitive substring of the name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Page number or `last`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    /// Filled from configuration, not from the query string
    #[serde(skip)]
    pub per_page: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum ListManufacturersError {
    #[error("Invalid page: {0}")]
    InvalidPage(#[from] InvalidPage),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<ListPage<Manufacturer>, ListManufacturersError>> for ListManufacturersQuery {}

impl crate::cqrs::middleware::Query for ListManufacturersQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: SqlitePool,
    query: ListManufacturersQuery,
) -> Result<ListPage<Manufacturer>, ListManufacturersError> {
    let search = SearchFilter::new("name", query.name.as_deref());
    let pattern = search.like_pattern();
    let where_clause = search.where_clause("name");

    let count_sql = format!("SELECT COUNT(*) FROM manufacturers {}", where_clause);
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    if let Some(pattern) = &pattern {
        count_query = count_query.bind(pattern.as_str());
    }
    let count = count_query.fetch_one(&pool).await?;

    let page_obj = PageObj::resolve(query.page.as_deref(), count, query.per_page)?;

    let list_sql = format!(
        "SELECT id, name, country FROM manufacturers {} ORDER BY name LIMIT ? OFFSET ?",
        where_clause
    );
    let mut list_query = sqlx::query_as::<_, Manufacturer>(&list_sql);
    if let Some(pattern) = &pattern {
        list_query = list_query.bind(pattern.as_str());
    }
    let items = list_query
        .bind(page_obj.per_page)
        .bind(page_obj.offset())
        .fetch_all(&pool)
        .await?;

    Ok(ListPage {
        list_key: "manufacturer_list",
        path: MANUFACTURER_LIST_PATH,
        items,
        page_obj,
        search,
    })
}
