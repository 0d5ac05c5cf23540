use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::models::{CarSummary, Driver, CAR_SUMMARY_SELECT, DRIVER_COLUMNS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDriverQuery {
    pub id: i64,
}

/// A driver with the cars they are assigned to
#[derive(Debug, Clone, Serialize)]
pub struct DriverDetail {
    #[serde(flatten)]
    pub driver: Driver,
    pub cars: Vec<CarSummary>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetDriverError {
    #[error("Driver {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<DriverDetail, GetDriverError>> for GetDriverQuery {}

impl crate::cqrs::middleware::Query for GetDriverQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: SqlitePool, query: GetDriverQuery) -> Result<DriverDetail, GetDriverError> {
    let driver_sql = format!("SELECT {} FROM drivers WHERE id = ?", DRIVER_COLUMNS);
    let driver = sqlx::query_as::<_, Driver>(&driver_sql)
        .bind(query.id)
        .fetch_optional(&pool)
        .await?
        .ok_or(GetDriverError::NotFound(query.id))?;

    let cars_sql = format!(
        "{} JOIN car_drivers cd ON cd.car_id = c.id WHERE cd.driver_id = ? ORDER BY c.id",
        CAR_SUMMARY_SELECT
    );
    let cars = sqlx::query_as::<_, CarSummary>(&cars_sql)
        .bind(query.id)
        .fetch_all(&pool)
        .await?;

    Ok(DriverDetail { driver, cars })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    #[tokio::test]
    async fn test_handle_includes_cars() {
        let pool = memory_pool().await;
        let tesla = TestManufacturer::new("Tesla", "USA").insert(&pool).await.unwrap();
        let driver = TestDriver::new("john_driver", "AB123456")
            .with_name("John", "Doe")
            .insert(&pool)
            .await
            .unwrap();
        TestCar::new("Model 3", &tesla)
            .with_driver(&driver)
            .insert(&pool)
            .await
            .unwrap();
        TestCar::new("Model S", &tesla).insert(&pool).await.unwrap();

        let detail = handle(pool, GetDriverQuery { id: driver.id }).await.unwrap();
        assert_eq!(detail.driver.to_string(), "john_driver (John Doe)");
        assert_eq!(detail.cars.len(), 1);
        assert_eq!(detail.cars[0].model, "Model 3");
        assert_eq!(detail.cars[0].manufacturer.name, "Tesla");

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["username"], "john_driver");
        assert!(json.get("password").is_none());
        assert_eq!(json["cars"][0]["model"], "Model 3");
    }

    #[tokio::test]
    async fn test_handle_not_found() {
        let pool = memory_pool().await;
        let result = handle(pool, GetDriverQuery { id: 1 }).await;
        assert!(matches!(result, Err(GetDriverError::NotFound(1))));
    }
}
