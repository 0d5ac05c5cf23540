//! Database models
//!
//! Row types for the three record kinds. Their `Display` output is what the
//! rest of the service uses whenever a record has to be named in one line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow, Row};

/// Car manufacturer; `name` is unique
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Manufacturer {
    pub id: i64,
    pub name: String,
    pub country: String,
}

impl std::fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.country)
    }
}

/// A driver is also the login identity of the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: i64,
    pub username: String,
    /// Argon2 PHC string; never rendered
    #[serde(skip_serializing, default)]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub license_number: String,
    pub is_staff: bool,
    pub date_joined: DateTime<Utc>,
}

impl Driver {
    pub fn get_absolute_url(&self) -> String {
        driver_url(self.id)
    }

    /// Check a raw password against the stored hash
    pub fn check_password(&self, raw_password: &str) -> bool {
        crate::auth::password::verify_password(raw_password, &self.password)
    }
}

impl std::fmt::Display for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} {})", self.username, self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Car {
    pub id: i64,
    pub model: String,
    pub manufacturer_id: i64,
}

impl Car {
    pub fn get_absolute_url(&self) -> String {
        car_url(self.id)
    }
}

impl std::fmt::Display for Car {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.model)
    }
}

/// A car together with its manufacturer, as list and detail views show it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarSummary {
    pub id: i64,
    pub model: String,
    pub manufacturer: Manufacturer,
}

impl<'r> FromRow<'r, SqliteRow> for CarSummary {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            model: row.try_get("model")?,
            manufacturer: Manufacturer {
                id: row.try_get("manufacturer_id")?,
                name: row.try_get("manufacturer_name")?,
                country: row.try_get("manufacturer_country")?,
            },
        })
    }
}

impl std::fmt::Display for CarSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.model)
    }
}

pub fn driver_url(id: i64) -> String {
    format!("/drivers/{}/", id)
}

pub fn car_url(id: i64) -> String {
    format!("/cars/{}/", id)
}

/// Column list for `SELECT`s that decode into [`Driver`]
pub(crate) const DRIVER_COLUMNS: &str =
    "id, username, password, first_name, last_name, license_number, is_staff, date_joined";

/// `SELECT ... FROM cars c JOIN manufacturers m` decoding into [`CarSummary`]
pub(crate) const CAR_SUMMARY_SELECT: &str = "SELECT c.id, c.model, \
     m.id AS manufacturer_id, m.name AS manufacturer_name, m.country AS manufacturer_country \
     FROM cars c JOIN manufacturers m ON m.id = c.manufacturer_id";
