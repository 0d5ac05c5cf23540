use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::models::{CarSummary, Driver, CAR_SUMMARY_SELECT, DRIVER_COLUMNS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetCarQuery {
    pub id: i64,
}

/// A car with its manufacturer and assigned drivers
#[derive(Debug, Clone, Serialize)]
pub struct CarDetail {
    #[serde(flatten)]
    pub car: CarSummary,
    pub drivers: Vec<Driver>,
}

impl CarDetail {
    pub fn is_assigned(&self, driver_id: i64) -> bool {
        self.drivers.iter().any(|d| d.id == driver_id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GetCarError {
    #[error("Car {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<CarDetail, GetCarError>> for GetCarQuery {}

impl crate::cqrs::middleware::Query for GetCarQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: SqlitePool, query: GetCarQuery) -> Result<CarDetail, GetCarError> {
    let car_sql = format!("{} WHERE c.id = ?", CAR_SUMMARY_SELECT);
    let car = sqlx::query_as::<_, CarSummary>(&car_sql)
        .bind(query.id)
        .fetch_optional(&pool)
        .await?
        .ok_or(GetCarError::NotFound(query.id))?;

    let drivers_sql = format!(
        "SELECT {} FROM drivers WHERE id IN (SELECT driver_id FROM car_drivers WHERE car_id = ?) \
         ORDER BY username",
        DRIVER_COLUMNS
    );
    let drivers = sqlx::query_as::<_, Driver>(&drivers_sql)
        .bind(query.id)
        .fetch_all(&pool)
        .await?;

    Ok(CarDetail { car, drivers })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    #[tokio::test]
    async fn test_handle_includes_manufacturer_and_drivers() {
        let pool = memory_pool().await;
        let tesla = TestManufacturer::new("Tesla", "USA").insert(&pool).await.unwrap();
        let john = TestDriver::new("john_driver", "AB123456").insert(&pool).await.unwrap();
        let jane = TestDriver::new("jane_driver", "CD654321").insert(&pool).await.unwrap();
        let car = TestCar::new("Model 3", &tesla)
            .with_driver(&john)
            .with_driver(&jane)
            .insert(&pool)
            .await
            .unwrap();

        let detail = handle(pool, GetCarQuery { id: car.id }).await.unwrap();
        assert_eq!(detail.car.manufacturer.to_string(), "Tesla USA");
        let usernames: Vec<_> = detail.drivers.iter().map(|d| d.username.as_str()).collect();
        assert_eq!(usernames, vec!["jane_driver", "john_driver"]);
        assert!(detail.is_assigned(john.id));

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["model"], "Model 3");
        assert!(json["drivers"][0].get("password").is_none());
    }

    #[tokio::test]
    async fn test_handle_not_found() {
        let pool = memory_pool().await;
        let result = handle(pool, GetCarQuery { id: 3 }).await;
        assert!(matches!(result, Err(GetCarError::NotFound(3))));
    }
}
