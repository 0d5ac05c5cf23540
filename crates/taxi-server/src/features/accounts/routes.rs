//! Account routes; the only routes reachable without a session
//!
//! - `GET|POST /accounts/login/`
//! - `POST /accounts/logout/`

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use super::commands::{LoginCommand, LoginError, LogoutCommand, LogoutError};
use crate::api::response::{found, ErrorResponse};
use crate::config::{SessionConfig, LOGIN_URL};
use crate::features::{shared::FormContext, AppState};
use crate::middleware::auth::{removal_cookie, session_cookie, session_key_from_headers};

pub fn accounts_routes() -> Router<AppState> {
    Router::new()
        .route("/accounts/login/", get(login_form).post(login))
        .route("/accounts/logout/", post(logout))
}

#[derive(Debug, Default, Deserialize)]
struct LoginFormQuery {
    next: Option<String>,
}

async fn login_form(Query(query): Query<LoginFormQuery>) -> Response {
    FormContext::unbound(LoginCommand {
        next: query.next,
        ..LoginCommand::default()
    })
    .into_response()
}

#[tracing::instrument(skip(pool, session_config, command), fields(username = %command.username))]
async fn login(
    State(pool): State<SqlitePool>,
    State(session_config): State<SessionConfig>,
    Form(mut command): Form<LoginCommand>,
) -> Result<Response, AccountApiError> {
    command.session_age_secs = session_config.cookie_age_secs;

    match super::commands::login::handle(pool, command.clone()).await {
        Ok(login) => {
            let cookie = session_cookie(login.session_key, &session_config);
            Ok((
                [(header::SET_COOKIE, cookie.to_string())],
                found(login.redirect_to),
            )
                .into_response())
        },
        Err(LoginError::Validation(errors)) => {
            Ok(FormContext::invalid(command, errors).into_response())
        },
        Err(e) => Err(e.into()),
    }
}

#[tracing::instrument(skip(pool, headers))]
async fn logout(
    State(pool): State<SqlitePool>,
    headers: HeaderMap,
) -> Result<Response, AccountApiError> {
    let command = LogoutCommand {
        session_key: session_key_from_headers(&headers),
    };
    super::commands::logout::handle(pool, command).await?;

    Ok((
        [(header::SET_COOKIE, removal_cookie().to_string())],
        found(LOGIN_URL),
    )
        .into_response())
}

/// Unified error type for account endpoints
#[derive(Debug, thiserror::Error)]
enum AccountApiError {
    #[error(transparent)]
    Login(#[from] LoginError),
    #[error(transparent)]
    Logout(#[from] LogoutError),
}

impl IntoResponse for AccountApiError {
    fn into_response(self) -> Response {
        tracing::error!("Error in account endpoint: {}", self);
        ErrorResponse::internal("A database error occurred")
    }
}
