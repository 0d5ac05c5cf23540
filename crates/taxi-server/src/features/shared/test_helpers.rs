//! Test helpers and fixtures for database tests
//!
//! Builders insert rows directly so handler tests only exercise the code
//! under test.
//!
//! # Examples
//!
//! ```rust,ignore
//! use taxi_server::features::shared::test_helpers::*;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let pool = memory_pool().await;
//!     let tesla = TestManufacturer::new("Tesla", "USA").insert(&pool).await.unwrap();
//!     let car = TestCar::new("Model 3", &tesla).insert(&pool).await.unwrap();
//!     // ... test logic ...
//! }
//! ```

use sqlx::SqlitePool;
use std::sync::OnceLock;

pub use crate::db::memory_pool;

/// Password every [`TestDriver`] can log in with
pub const TEST_PASSWORD: &str = "test-pass-123";

/// Argon2 is slow in debug builds; hash the shared password once
pub fn test_password_hash() -> String {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| {
        crate::auth::password::hash_password(TEST_PASSWORD).expect("hash test password")
    })
    .clone()
}

/// Builder for creating test manufacturers
#[derive(Debug, Clone)]
pub struct TestManufacturer {
    pub id: i64,
    pub name: String,
    pub country: String,
}

impl TestManufacturer {
    pub fn new(name: &str, country: &str) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            country: country.to_string(),
        }
    }

    /// Insert the manufacturer into the database
    pub async fn insert(self, pool: &SqlitePool) -> sqlx::Result<Self> {
        let id = sqlx::query_scalar("INSERT INTO manufacturers (name, country) VALUES (?, ?) RETURNING id")
            .bind(&self.name)
            .bind(&self.country)
            .fetch_one(pool)
            .await?;

        Ok(Self { id, ..self })
    }
}

/// Builder for creating test drivers
#[derive(Debug, Clone)]
pub struct TestDriver {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub license_number: String,
}

impl TestDriver {
    pub fn new(username: &str, license_number: &str) -> Self {
        Self {
            id: 0,
            username: username.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            license_number: license_number.to_string(),
        }
    }

    pub fn with_name(mut self, first_name: &str, last_name: &str) -> Self {
        self.first_name = first_name.to_string();
        self.last_name = last_name.to_string();
        self
    }

    /// Insert the driver with [`TEST_PASSWORD`]
    pub async fn insert(self, pool: &SqlitePool) -> sqlx::Result<Self> {
        let id = sqlx::query_scalar(
            r#"
            INSERT INTO drivers (username, password, first_name, last_name, license_number)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&self.username)
        .bind(test_password_hash())
        .bind(&self.first_name)
        .bind(&self.last_name)
        .bind(&self.license_number)
        .fetch_one(pool)
        .await?;

        Ok(Self { id, ..self })
    }
}

/// Builder for creating test cars
#[derive(Debug, Clone)]
pub struct TestCar {
    pub id: i64,
    pub model: String,
    pub manufacturer_id: i64,
    pub driver_ids: Vec<i64>,
}

impl TestCar {
    pub fn new(model: &str, manufacturer: &TestManufacturer) -> Self {
        Self {
            id: 0,
            model: model.to_string(),
            manufacturer_id: manufacturer.id,
            driver_ids: Vec::new(),
        }
    }

    pub fn with_driver(mut self, driver: &TestDriver) -> Self {
        self.driver_ids.push(driver.id);
        self
    }

    /// Insert the car and its driver assignments
    pub async fn insert(self, pool: &SqlitePool) -> sqlx::Result<Self> {
        let id = sqlx::query_scalar("INSERT INTO cars (model, manufacturer_id) VALUES (?, ?) RETURNING id")
            .bind(&self.model)
            .bind(self.manufacturer_id)
            .fetch_one(pool)
            .await?;

        for driver_id in &self.driver_ids {
            sqlx::query("INSERT INTO car_drivers (car_id, driver_id) VALUES (?, ?)")
                .bind(id)
                .bind(*driver_id)
                .execute(pool)
                .await?;
        }

        Ok(Self { id, ..self })
    }
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM {}", table);
    sqlx::query_scalar(&sql)
        .fetch_one(pool)
        .await
        .expect("count rows")
}
