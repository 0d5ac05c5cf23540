//! Car routes
//!
//! - `GET /cars/` - paginated list, filtered by `model`
//! - `GET /cars/:id/` - detail with manufacturer and drivers
//! - `GET|POST /cars/create/` - create form
//! - `GET|POST /cars/:id/update/` - update form
//! - `GET|POST /cars/:id/delete/` - confirmation and delete
//! - `POST /cars/:id/toggle-assign/` - assign or unassign the current driver

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Form, Json, Router,
};
use serde_json::json;
use sqlx::SqlitePool;

use super::{
    commands::{
        CreateCarCommand, CreateCarError, DeleteCarCommand, DeleteCarError, ToggleAssignCommand,
        ToggleAssignError, UpdateCarCommand, UpdateCarError,
    },
    queries::{GetCarError, GetCarQuery, ListCarsError, ListCarsQuery, CAR_LIST_PATH},
};
use crate::api::response::{found, ApiResponse, ErrorResponse};
use crate::auth::AuthSession;
use crate::config::PaginationConfig;
use crate::features::{shared::FormContext, AppState};
use crate::models::car_url;

pub fn cars_routes() -> Router<AppState> {
    Router::new()
        .route("/cars/", get(list_cars))
        .route("/cars/create/", get(create_car_form).post(create_car))
        .route("/cars/:id/", get(get_car))
        .route("/cars/:id/update/", get(update_car_form).post(update_car))
        .route("/cars/:id/delete/", get(delete_car_confirm).post(delete_car))
        .route("/cars/:id/toggle-assign/", post(toggle_assign))
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

#[tracing::instrument(skip(pool, pagination, query), fields(model = ?query.model, page = ?query.page))]
async fn list_cars(
    State(pool): State<SqlitePool>,
    State(pagination): State<PaginationConfig>,
    Query(mut query): Query<ListCarsQuery>,
) -> Result<Response, CarApiError> {
    query.per_page = pagination.page_size;
    let page = super::queries::list::handle(pool, query).await?;
    Ok(ApiResponse::success(page).into_response())
}

#[tracing::instrument(skip(pool, session), fields(driver_id = session.driver.id))]
async fn get_car(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<i64>,
) -> Result<Response, CarApiError> {
    let car = super::queries::get::handle(pool, GetCarQuery { id }).await?;
    let is_assigned = car.is_assigned(session.driver.id);
    Ok(ApiResponse::success(json!({ "car": car, "is_assigned": is_assigned })).into_response())
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

async fn create_car_form() -> Response {
    FormContext::unbound(CreateCarCommand::default()).into_response()
}

#[tracing::instrument(skip(pool, command), fields(model = %command.model))]
async fn create_car(
    State(pool): State<SqlitePool>,
    Form(command): Form<CreateCarCommand>,
) -> Result<Response, CarApiError> {
    match super::commands::create::handle(pool, command.clone()).await {
        Ok(car) => {
            tracing::info!(car_id = car.id, "Car created via form");
            Ok(found(CAR_LIST_PATH))
        },
        Err(CreateCarError::Validation(errors)) => {
            Ok(FormContext::invalid(command, errors).into_response())
        },
        Err(e) => Err(e.into()),
    }
}

#[tracing::instrument(skip(pool))]
async fn update_car_form(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Response, CarApiError> {
    let detail = super::queries::get::handle(pool, GetCarQuery { id }).await?;
    Ok(FormContext::unbound(UpdateCarCommand::from(&detail.car)).into_response())
}

#[tracing::instrument(skip(pool, command))]
async fn update_car(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Form(mut command): Form<UpdateCarCommand>,
) -> Result<Response, CarApiError> {
    command.id = id;

    match super::commands::update::handle(pool, command.clone()).await {
        Ok(_) => Ok(found(CAR_LIST_PATH)),
        Err(UpdateCarError::Validation(errors)) => {
            Ok(FormContext::invalid(command, errors).into_response())
        },
        Err(e) => Err(e.into()),
    }
}

#[tracing::instrument(skip(pool))]
async fn delete_car_confirm(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Response, CarApiError> {
    let detail = super::queries::get::handle(pool, GetCarQuery { id }).await?;
    Ok(ApiResponse::success(json!({ "object": detail.car })).into_response())
}

#[tracing::instrument(skip(pool))]
async fn delete_car(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Response, CarApiError> {
    let deleted = super::commands::delete::handle(pool, DeleteCarCommand { id }).await?;
    tracing::info!(car = %deleted, "Car deleted via form");
    Ok(found(CAR_LIST_PATH))
}

#[tracing::instrument(skip(pool, session), fields(driver_id = session.driver.id))]
async fn toggle_assign(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<i64>,
) -> Result<Response, CarApiError> {
    let command = ToggleAssignCommand {
        car_id: id,
        driver_id: session.driver.id,
    };
    super::commands::toggle_assign::handle(pool, command).await?;
    Ok(found(&car_url(id)))
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for car endpoints
#[derive(Debug)]
enum CarApiError {
    CreateError(CreateCarError),
    UpdateError(UpdateCarError),
    DeleteError(DeleteCarError),
    ToggleError(ToggleAssignError),
    GetError(GetCarError),
    ListError(ListCarsError),
}

impl From<CreateCarError> for CarApiError {
    fn from(err: CreateCarError) -> Self {
        Self::CreateError(err)
    }
}

impl From<UpdateCarError> for CarApiError {
    fn from(err: UpdateCarError) -> Self {
        Self::UpdateError(err)
    }
}

impl From<DeleteCarError> for CarApiError {
    fn from(err: DeleteCarError) -> Self {
        Self::DeleteError(err)
    }
}

impl From<ToggleAssignError> for CarApiError {
    fn from(err: ToggleAssignError) -> Self {
        Self::ToggleError(err)
    }
}

impl From<GetCarError> for CarApiError {
    fn from(err: GetCarError) -> Self {
        Self::GetError(err)
    }
}

impl From<ListCarsError> for CarApiError {
    fn from(err: ListCarsError) -> Self {
        Self::ListError(err)
    }
}

impl IntoResponse for CarApiError {
    fn into_response(self) -> Response {
        match self {
            CarApiError::UpdateError(UpdateCarError::NotFound(_))
            | CarApiError::DeleteError(DeleteCarError::NotFound(_))
            | CarApiError::ToggleError(ToggleAssignError::CarNotFound(_))
            | CarApiError::GetError(GetCarError::NotFound(_))
            | CarApiError::ListError(ListCarsError::InvalidPage(_)) => {
                ErrorResponse::not_found(self.to_string())
            },
            CarApiError::CreateError(CreateCarError::Validation(_))
            | CarApiError::UpdateError(UpdateCarError::Validation(_)) => {
                let error = ErrorResponse::new("VALIDATION_ERROR", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            CarApiError::CreateError(CreateCarError::Database(_))
            | CarApiError::UpdateError(UpdateCarError::Database(_))
            | CarApiError::DeleteError(DeleteCarError::Database(_))
            | CarApiError::ToggleError(ToggleAssignError::Database(_))
            | CarApiError::GetError(GetCarError::Database(_))
            | CarApiError::ListError(ListCarsError::Database(_)) => {
                tracing::error!("Database error in car endpoint: {}", self);
                ErrorResponse::internal("A database error occurred")
            },
        }
    }
}

impl std::fmt::Display for CarApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateError(e) => write!(f, "{}", e),
            Self::UpdateError(e) => write!(f, "{}", e),
            Self::DeleteError(e) => write!(f, "{}", e),
            Self::ToggleError(e) => write!(f, "{}", e),
            Self::GetError(e) => write!(f, "{}", e),
            Self::ListError(e) => write!(f, "{}", e),
        }
    }
}
