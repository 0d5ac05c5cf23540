//! Test helpers for taxi server integration tests
//!
//! - An in-memory database with migrations applied
//! - The full application router, driven with `oneshot`
//! - Request builders carrying the session cookie
//! - Body and header assertions

#![allow(dead_code)]

pub mod fixtures;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use taxi_server::{
    api,
    config::{Config, DatabaseConfig},
    db, AppState,
};

pub use fixtures::*;

/// Application under test, backed by a private in-memory database
pub struct TestApp {
    pub pool: SqlitePool,
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_page_size(Config::default().pagination.page_size).await
    }

    pub async fn with_page_size(page_size: i64) -> Self {
        let mut config = Config::default();
        // A single connection that is never recycled keeps the in-memory database alive
        config.database = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_secs: 5,
            idle_timeout_secs: 3600,
        };
        config.pagination.page_size = page_size;

        let pool = db::create_pool(&config.database)
            .await
            .expect("Failed to open in-memory database");
        db::run_migrations(&pool).await.expect("Failed to run migrations");

        let state = AppState {
            db: pool.clone(),
            pagination: config.pagination,
            session: config.session,
        };
        let router = api::create_router(state, &config);

        Self { pool, router }
    }

    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible")
    }

    pub async fn get(&self, uri: &str, session: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = session {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.request(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, form: &[(&str, &str)], session: Option<&str>) -> Response {
        let body = serde_urlencoded::to_string(form).unwrap();
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = session {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.request(builder.body(Body::from(body)).unwrap()).await
    }

    /// Log in through the login form; returns the `Cookie` header value
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post_form(
                "/accounts/login/",
                &[("username", username), ("password", password)],
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::FOUND, "login should redirect");

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("login sets a cookie")
            .to_str()
            .unwrap();
        set_cookie
            .split(';')
            .next()
            .expect("cookie pair")
            .trim()
            .to_string()
    }

    /// Create a driver and log in as them
    pub async fn login_as_new_driver(&self, username: &str) -> (i64, String) {
        let driver_id = DriverFixture::new(username, "ZZ999999").insert(&self.pool).await;
        let cookie = self.login(username, TEST_PASSWORD).await;
        (driver_id, cookie)
    }
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Missing Location header")
        .to_str()
        .unwrap()
}

pub fn assert_redirects_to(response: &Response, expected: &str) {
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(response), expected);
}
