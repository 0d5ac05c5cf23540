//! Manufacturer routes
//!
//! - `GET /manufacturers/` - paginated list, filtered by `name`
//! - `GET|POST /manufacturers/create/` - create form
//! - `GET|POST /manufacturers/:id/update/` - update form
//! - `GET|POST /manufacturers/:id/delete/` - confirmation and delete

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use serde_json::json;
use sqlx::SqlitePool;

use super::{
    commands::{
        CreateManufacturerCommand, CreateManufacturerError, DeleteManufacturerCommand,
        DeleteManufacturerError, UpdateManufacturerCommand, UpdateManufacturerError,
    },
    queries::{
        GetManufacturerError, GetManufacturerQuery, ListManufacturersError,
        ListManufacturersQuery, MANUFACTURER_LIST_PATH,
    },
};
use crate::api::response::{found, ApiResponse, ErrorResponse};
use crate::config::PaginationConfig;
use crate::features::{shared::FormContext, AppState};

pub fn manufacturers_routes() -> Router<AppState> {
    Router::new()
        .route("/manufacturers/", get(list_manufacturers))
        .route(
            "/manufacturers/create/",
            get(create_manufacturer_form).post(create_manufacturer),
        )
        .route(
            "/manufacturers/:id/update/",
            get(update_manufacturer_form).post(update_manufacturer),
        )
        .route(
            "/manufacturers/:id/delete/",
            get(delete_manufacturer_confirm).post(delete_manufacturer),
        )
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

#[tracing::instrument(skip(pool, pagination, query), fields(name = ?query.name, page = ?query.page))]
async fn list_manufacturers(
    State(pool): State<SqlitePool>,
    State(pagination): State<PaginationConfig>,
    Query(mut query): Query<ListManufacturersQuery>,
) -> Result<Response, ManufacturerApiError> {
    query.per_page = pagination.page_size;
    let page = super::queries::list::handle(pool, query).await?;

    tracing::debug!(count = page.items.len(), total = page.page_obj.count, "Manufacturers listed");

    Ok(ApiResponse::success(page).into_response())
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

async fn create_manufacturer_form() -> Response {
    FormContext::unbound(CreateManufacturerCommand::default()).into_response()
}

#[tracing::instrument(skip(pool, command), fields(name = %command.name))]
async fn create_manufacturer(
    State(pool): State<SqlitePool>,
    Form(command): Form<CreateManufacturerCommand>,
) -> Result<Response, ManufacturerApiError> {
    match super::commands::create::handle(pool, command.clone()).await {
        Ok(manufacturer) => {
            tracing::info!(manufacturer_id = manufacturer.id, "Manufacturer created via form");
            Ok(found(MANUFACTURER_LIST_PATH))
        },
        Err(CreateManufacturerError::Validation(errors)) => {
            Ok(FormContext::invalid(command, errors).into_response())
        },
        Err(e) => Err(e.into()),
    }
}

#[tracing::instrument(skip(pool))]
async fn update_manufacturer_form(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Response, ManufacturerApiError> {
    let manufacturer = super::queries::get::handle(pool, GetManufacturerQuery { id }).await?;
    Ok(FormContext::unbound(UpdateManufacturerCommand::from(&manufacturer)).into_response())
}

#[tracing::instrument(skip(pool, command))]
async fn update_manufacturer(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Form(mut command): Form<UpdateManufacturerCommand>,
) -> Result<Response, ManufacturerApiError> {
    command.id = id;

    match super::commands::update::handle(pool, command.clone()).await {
        Ok(_) => Ok(found(MANUFACTURER_LIST_PATH)),
        Err(UpdateManufacturerError::Validation(errors)) => {
            Ok(FormContext::invalid(command, errors).into_response())
        },
        Err(e) => Err(e.into()),
    }
}

#[tracing::instrument(skip(pool))]
async fn delete_manufacturer_confirm(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Response, ManufacturerApiError> {
    let manufacturer = super::queries::get::handle(pool, GetManufacturerQuery { id }).await?;
    Ok(ApiResponse::success(json!({ "object": manufacturer })).into_response())
}

#[tracing::instrument(skip(pool))]
async fn delete_manufacturer(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Response, ManufacturerApiError> {
    let deleted = super::commands::delete::handle(pool, DeleteManufacturerCommand { id }).await?;
    tracing::info!(manufacturer = %deleted, "Manufacturer deleted via form");
    Ok(found(MANUFACTURER_LIST_PATH))
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for manufacturer endpoints
#[derive(Debug)]
enum ManufacturerApiError {
    CreateError(CreateManufacturerError),
    UpdateError(UpdateManufacturerError),
    DeleteError(DeleteManufacturerError),
    GetError(GetManufacturerError),
    ListError(ListManufacturersError),
}

impl From<CreateManufacturerError> for ManufacturerApiError {
    fn from(err: CreateManufacturerError) -> Self {
        Self::CreateError(err)
    }
}

impl From<UpdateManufacturerError> for ManufacturerApiError {
    fn from(err: UpdateManufacturerError) -> Self {
        Self::UpdateError(err)
    }
}

impl From<DeleteManufacturerError> for ManufacturerApiError {
    fn from(err: DeleteManufacturerError) -> Self {
        Self::DeleteError(err)
    }
}

impl From<GetManufacturerError> for ManufacturerApiError {
    fn from(err: GetManufacturerError) -> Self {
        Self::GetError(err)
    }
}

impl From<ListManufacturersError> for ManufacturerApiError {
    fn from(err: ListManufacturersError) -> Self {
        Self::ListError(err)
    }
}

impl IntoResponse for ManufacturerApiError {
    fn into_response(self) -> Response {
        match self {
            ManufacturerApiError::UpdateError(UpdateManufacturerError::NotFound(_))
            | ManufacturerApiError::DeleteError(DeleteManufacturerError::NotFound(_))
            | ManufacturerApiError::GetError(GetManufacturerError::NotFound(_))
            | ManufacturerApiError::ListError(ListManufacturersError::InvalidPage(_)) => {
                ErrorResponse::not_found(self.to_string())
            },
            ManufacturerApiError::DeleteError(DeleteManufacturerError::HasDependencies(_)) => {
                let error = ErrorResponse::new("CONFLICT", self.to_string());
                (StatusCode::CONFLICT, Json(error)).into_response()
            },
            ManufacturerApiError::CreateError(CreateManufacturerError::Validation(_))
            | ManufacturerApiError::UpdateError(UpdateManufacturerError::Validation(_)) => {
                let error = ErrorResponse::new("VALIDATION_ERROR", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            ManufacturerApiError::CreateError(CreateManufacturerError::Database(_))
            | ManufacturerApiError::UpdateError(UpdateManufacturerError::Database(_))
            | ManufacturerApiError::DeleteError(DeleteManufacturerError::Database(_))
            | ManufacturerApiError::GetError(GetManufacturerError::Database(_))
            | ManufacturerApiError::ListError(ListManufacturersError::Database(_)) => {
                tracing::error!("Database error in manufacturer endpoint: {}", self);
                ErrorResponse::internal("A database error occurred")
            },
        }
    }
}

impl std::fmt::Display for ManufacturerApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateError(e) => write!(f, "{}", e),
            Self::UpdateError(e) => write!(f, "{}", e),
            Self::DeleteError(e) => write!(f, "{}", e),
            Self::GetError(e) => write!(f, "{}", e),
            Self::ListError(e) => write!(f, "{}", e),
        }
    }
}
