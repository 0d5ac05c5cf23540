//! Login gate and session cookies
//!
//! [`LoginRequiredLayer`] wraps every gated route. It resolves the
//! `sessionid` cookie against the session store; a live session is inserted
//! into the request extensions as [`AuthSession`], anything else is
//! redirected to the login page with the original path as `next`.

use axum::{
    extract::Request,
    http::{header, HeaderMap, Uri},
    response::{IntoResponse, Response},
};
use cookie::{time::Duration, Cookie, SameSite};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sqlx::SqlitePool;
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tower::{Layer, Service};
use tracing::{debug, error};

use crate::api::response::{found, ErrorResponse};
use crate::auth::{session, AuthSession};
use crate::config::{SessionConfig, LOGIN_URL, SESSION_COOKIE_NAME};

/// Characters escaped in the `next` parameter; `/` stays readable
const NEXT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Session key from the request's `Cookie` headers, if present
pub fn session_key_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|key| !key.is_empty())
}

/// `Set-Cookie` value opening a session
pub fn session_cookie(session_key: String, config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, session_key))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::seconds(config.cookie_age_secs))
        .secure(config.cookie_secure)
        .build()
}

/// `Set-Cookie` value that makes the browser drop the session cookie
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE_NAME, "")).path("/").build();
    cookie.make_removal();
    cookie
}

/// `302` to the login page, remembering where the client wanted to go
pub fn login_redirect(uri: &Uri) -> Response {
    let next = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    let location = format!(
        "{}?next={}",
        LOGIN_URL,
        utf8_percent_encode(next, NEXT_ENCODE_SET)
    );
    found(location)
}

/// Layer gating the wrapped routes behind a live session
#[derive(Clone)]
pub struct LoginRequiredLayer {
    pool: SqlitePool,
}

impl LoginRequiredLayer {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl<S> Layer<S> for LoginRequiredLayer {
    type Service = LoginRequired<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoginRequired {
            inner,
            pool: self.pool.clone(),
        }
    }
}

#[derive(Clone)]
pub struct LoginRequired<S> {
    inner: S,
    pool: SqlitePool,
}

impl<S> Service<Request> for LoginRequired<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request) -> Self::Future {
        // The clone may not be ready; swap so the ready service handles this call
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let pool = self.pool.clone();

        Box::pin(async move {
            let Some(session_key) = session_key_from_headers(request.headers()) else {
                debug!(uri = %request.uri(), "Anonymous request redirected to login");
                return Ok(login_redirect(request.uri()));
            };

            match session::load(&pool, &session_key).await {
                Ok(Some(auth)) => {
                    request.extensions_mut().insert::<AuthSession>(auth);
                    inner.call(request).await
                },
                Ok(None) => {
                    debug!(uri = %request.uri(), "Unknown or expired session");
                    Ok(login_redirect(request.uri()))
                },
                Err(e) => {
                    error!(error = %e, "Failed to load session");
                    Ok(ErrorResponse::internal("A database error occurred").into_response())
                },
            }
        })
    }
}
