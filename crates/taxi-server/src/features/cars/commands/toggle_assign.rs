//! Toggle the current driver's assignment to a car
//!
//! Applying the command twice leaves the assignment as it was.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleAssignCommand {
    pub car_id: i64,
    pub driver_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleAssignResponse {
    pub car_id: i64,
    pub driver_id: i64,
    /// Whether the driver is assigned after the toggle
    pub assigned: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ToggleAssignError {
    #[error("Car {0} not found")]
    CarNotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<ToggleAssignResponse, ToggleAssignError>> for ToggleAssignCommand {}

impl crate::cqrs::middleware::Command for ToggleAssignCommand {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: SqlitePool,
    command: ToggleAssignCommand,
) -> Result<ToggleAssignResponse, ToggleAssignError> {
    let mut tx = pool.begin().await?;

    let car_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM cars WHERE id = ?)")
        .bind(command.car_id)
        .fetch_one(&mut *tx)
        .await?;
    if !car_exists {
        return Err(ToggleAssignError::CarNotFound(command.car_id));
    }

    let removed = sqlx::query("DELETE FROM car_drivers WHERE car_id = ? AND driver_id = ?")
        .bind(command.car_id)
        .bind(command.driver_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if removed == 0 {
        sqlx::query("INSERT INTO car_drivers (car_id, driver_id) VALUES (?, ?)")
            .bind(command.car_id)
            .bind(command.driver_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    let assigned = removed == 0;
    tracing::info!(assigned, "Car assignment toggled");

    Ok(ToggleAssignResponse {
        car_id: command.car_id,
        driver_id: command.driver_id,
        assigned,
    })
}
