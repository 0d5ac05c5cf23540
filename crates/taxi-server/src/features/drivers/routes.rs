//! Driver routes
//!
//! - `GET /drivers/` - paginated list, filtered by `username`
//! - `GET /drivers/:id/` - detail with assigned cars
//! - `GET|POST /drivers/create/` - registration form
//! - `GET|POST /drivers/:id/update/` - license number form
//! - `GET|POST /drivers/:id/delete/` - confirmation and delete

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
        CreateDriverCommand, CreateDriverError, DeleteDriverCommand, DeleteDriverError,
        UpdateLicenseCommand, UpdateLicenseError,
    },
    queries::{GetDriverError, GetDriverQuery, ListDriversError, ListDriversQuery, DRIVER_LIST_PATH},
};
use crate::api::response::{found, ApiResponse, ErrorResponse};
use crate::config::PaginationConfig;
use crate::features::{shared::FormContext, AppState};

pub fn drivers_routes() -> Router<AppState> {
    Router::new()
        .route("/drivers/", get(list_drivers))
        .route("/drivers/create/", get(create_driver_form).post(create_driver))
        .route("/drivers/:id/", get(get_driver))
        .route("/drivers/:id/update/", get(update_license_form).post(update_license))
        .route("/drivers/:id/delete/", get(delete_driver_confirm).post(delete_driver))
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

#[tracing::instrument(skip(pool, pagination, query), fields(username = ?query.username, page = ?query.page))]
async fn list_drivers(
    State(pool): State<SqlitePool>,
    State(pagination): State<PaginationConfig>,
    Query(mut query): Query<ListDriversQuery>,
) -> Result<Response, DriverApiError> {
    query.per_page = pagination.page_size;
    let page = super::queries::list::handle(pool, query).await?;

    tracing::debug!(count = page.items.len(), total = page.page_obj.count, "Drivers listed");

    Ok(ApiResponse::success(page).into_response())
}

#[tracing::instrument(skip(pool))]
async fn get_driver(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Response, DriverApiError> {
    let driver = super::queries::get::handle(pool, GetDriverQuery { id }).await?;
    Ok(ApiResponse::success(json!({ "driver": driver })).into_response())
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

async fn create_driver_form() -> Response {
    FormContext::unbound(CreateDriverCommand::default()).into_response()
}

#[tracing::instrument(skip(pool, command), fields(username = %command.username))]
async fn create_driver(
    State(pool): State<SqlitePool>,
    Form(command): Form<CreateDriverCommand>,
) -> Result<Response, DriverApiError> {
    match super::commands::create::handle(pool, command.clone()).await {
        Ok(driver) => {
            tracing::info!(driver_id = driver.id, "Driver created via form");
            Ok(found(driver.get_absolute_url()))
        },
        Err(CreateDriverError::Validation(errors)) => {
            Ok(FormContext::invalid(command, errors).into_response())
        },
        Err(e) => Err(e.into()),
    }
}

#[tracing::instrument(skip(pool))]
async fn update_license_form(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Response, DriverApiError> {
    let detail = super::queries::get::handle(pool, GetDriverQuery { id }).await?;
    Ok(FormContext::unbound(UpdateLicenseCommand::from(&detail.driver)).into_response())
}

#[tracing::instrument(skip(pool, command))]
async fn update_license(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Form(mut command): Form<UpdateLicenseCommand>,
) -> Result<Response, DriverApiError> {
    command.id = id;

    match super::commands::update_license::handle(pool, command.clone()).await {
        Ok(driver) => Ok(found(driver.get_absolute_url())),
        Err(UpdateLicenseError::Validation(errors)) => {
            Ok(FormContext::invalid(command, errors).into_response())
        },
        Err(e) => Err(e.into()),
    }
}

#[tracing::instrument(skip(pool))]
async fn delete_driver_confirm(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Response, DriverApiError> {
    let detail = super::queries::get::handle(pool, GetDriverQuery { id }).await?;
    Ok(ApiResponse::success(json!({ "object": detail.driver })).into_response())
}

#[tracing::instrument(skip(pool))]
async fn delete_driver(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Response, DriverApiError> {
    super::commands::delete::handle(pool, DeleteDriverCommand { id }).await?;
    Ok(found(DRIVER_LIST_PATH))
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for driver endpoints
#[derive(Debug)]
enum DriverApiError {
    CreateError(CreateDriverError),
    UpdateError(UpdateLicenseError),
    DeleteError(DeleteDriverError),
    GetError(GetDriverError),
    ListError(ListDriversError),
}

impl From<CreateDriverError> for DriverApiError {
    fn from(err: CreateDriverError) -> Self {
        Self::CreateError(err)
    }
}

impl From<UpdateLicenseError> for DriverApiError {
    fn from(err: UpdateLicenseError) -> Self {
        Self::UpdateError(err)
    }
}

impl From<DeleteDriverError> for DriverApiError {
    fn from(err: DeleteDriverError) -> Self {
        Self::DeleteError(err)
    }
}

impl From<GetDriverError> for DriverApiError {
    fn from(err: GetDriverError) -> Self {
        Self::GetError(err)
    }
}

impl From<ListDriversError> for DriverApiError {
    fn from(err: ListDriversError) -> Self {
        Self::ListError(err)
    }
}

impl IntoResponse for DriverApiError {
    fn into_response(self) -> Response {
        match self {
            DriverApiError::UpdateError(UpdateLicenseError::NotFound(_))
            | DriverApiError::DeleteError(DeleteDriverError::NotFound(_))
            | DriverApiError::GetError(GetDriverError::NotFound(_))
            | DriverApiError::ListError(ListDriversError::InvalidPage(_)) => {
                ErrorResponse::not_found(self.to_string())
            },
            DriverApiError::CreateError(CreateDriverError::Validation(_))
            | DriverApiError::UpdateError(UpdateLicenseError::Validation(_)) => {
                let error = ErrorResponse::new("VALIDATION_ERROR", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            DriverApiError::CreateError(CreateDriverError::Password(_)) => {
                tracing::error!("Password hashing failed: {}", self);
                ErrorResponse::internal("Could not store the password")
            },
            DriverApiError::CreateError(CreateDriverError::Database(_))
            | DriverApiError::UpdateError(UpdateLicenseError::Database(_))
            | DriverApiError::DeleteError(DeleteDriverError::Database(_))
            | DriverApiError::GetError(GetDriverError::Database(_))
            | DriverApiError::ListError(ListDriversError::Database(_)) => {
                tracing::error!("Database error in driver endpoint: {}", self);
                ErrorResponse::internal("A database error occurred")
            },
        }
    }
}

impl std::fmt::Display for DriverApiError {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let not_found = DriverApiError::GetError(GetDriverError::NotFound(4));
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let hash = DriverApiError::CreateError(CreateDriverError::Password(
            taxi_common::TaxiError::PasswordHash("salt".to_string()),
        ));
        assert_eq!(hash.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
