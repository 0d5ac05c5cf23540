//! Fixture builders inserting rows directly into the test database

use sqlx::SqlitePool;
use std::sync::OnceLock;

/// Password every [`DriverFixture`] can log in with
pub const TEST_PASSWORD: &str = "test-pass-123";

fn test_password_hash() -> String {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| {
        taxi_server::auth::password::hash_password(TEST_PASSWORD).expect("hash test password")
    })
    .clone()
}

pub async fn insert_manufacturer(pool: &SqlitePool, name: &str, country: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO manufacturers (name, country) VALUES (?, ?) RETURNING id")
        .bind(name)
        .bind(country)
        .fetch_one(pool)
        .await
        .expect("Failed to insert manufacturer")
}

pub async fn insert_car(pool: &SqlitePool, model: &str, manufacturer_id: i64) -> i64 {
    sqlx::query_scalar("INSERT INTO cars (model, manufacturer_id) VALUES (?, ?) RETURNING id")
        .bind(model)
        .bind(manufacturer_id)
        .fetch_one(pool)
        .await
        .expect("Failed to insert car")
}

pub async fn assign(pool: &SqlitePool, car_id: i64, driver_id: i64) {
    sqlx::query("INSERT INTO car_drivers (car_id, driver_id) VALUES (?, ?)")
        .bind(car_id)
        .bind(driver_id)
        .execute(pool)
        .await
        .expect("Failed to assign driver");
}

pub async fn count(pool: &SqlitePool, table: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM {}", table);
    sqlx::query_scalar(&sql)
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}

/// Builder for driver rows
#[derive(Debug, Clone)]
pub struct DriverFixture {
    username: String,
    license_number: String,
    first_name: String,
    last_name: String,
}

impl DriverFixture {
    pub fn new(username: impl Into<String>, license_number: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            license_number: license_number.into(),
            first_name: String::new(),
            last_name: String::new(),
        }
    }

    pub fn with_name(mut self, first_name: &str, last_name: &str) -> Self {
        self.first_name = first_name.to_string();
        self.last_name = last_name.to_string();
        self
    }

    pub async fn insert(self, pool: &SqlitePool) -> i64 {
        sqlx::query_scalar(
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
        .await
        .expect("Failed to insert driver")
    }
}
