//! Database error handling utilities
//!
//! Provides helpers for handling common database errors like unique constraint
//! violations and foreign key violations.
//!
//! # Examples
//!
//! ```rust,ignore
//! use taxi_server::features::shared::error_helpers::map_unique_violation;
//!
//! sqlx::query("INSERT INTO manufacturers (name, country) VALUES (?, ?)")
//!     .execute(&pool)
//!     .await
//!     .map_err(|e| map_unique_violation(e, CreateManufacturerError::DuplicateName, Into::into))?;
//! ```

use sqlx::Error as SqlxError;

/// Check if the error is a unique constraint violation
pub fn is_unique_violation(error: &SqlxError) -> bool {
    if let SqlxError::Database(db_err) = error {
        return db_err.is_unique_violation();
    }
    false
}

/// Check if the error is a foreign key violation
pub fn is_foreign_key_violation(error: &SqlxError) -> bool {
    if let SqlxError::Database(db_err) = error {
        return db_err.is_foreign_key_violation();
    }
    false
}

/// Return `unique_error` on a unique violation, otherwise wrap the original error
pub fn map_unique_violation<E, F>(error: SqlxError, unique_error: E, default_wrapper: F) -> E
where
    F: FnOnce(SqlxError) -> E,
{
    if is_unique_violation(&error) {
        unique_error
    } else {
        default_wrapper(error)
    }
}

/// Return `fk_error` on a foreign key violation, otherwise wrap the original error
pub fn map_foreign_key_violation<E, F>(error: SqlxError, fk_error: E, default_wrapper: F) -> E
where
    F: FnOnce(SqlxError) -> E,
{
    if is_foreign_key_violation(&error) {
        fk_error
    } else {
        default_wrapper(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Duplicate,
        HasDependencies,
        Database(String),
    }

    fn wrap(e: SqlxError) -> TestError {
        TestError::Database(e.to_string())
    }

    #[tokio::test]
    async fn test_unique_violation_detected() {
        let pool = memory_pool().await;
        let insert = || {
            sqlx::query("INSERT INTO manufacturers (name, country) VALUES ('Tesla', 'USA')")
                .execute(&pool)
        };

        insert().await.unwrap();
        let err = insert().await.unwrap_err();

        assert!(is_unique_violation(&err));
        assert!(!is_foreign_key_violation(&err));
        assert_eq!(
            map_unique_violation(err, TestError::Duplicate, wrap),
            TestError::Duplicate
        );
    }

    #[tokio::test]
    async fn test_foreign_key_violation_detected() {
        let pool = memory_pool().await;
        let err = sqlx::query("INSERT INTO cars (model, manufacturer_id) VALUES ('Ghost', 999)")
            .execute(&pool)
            .await
            .unwrap_err();

        assert!(is_foreign_key_violation(&err));
        assert_eq!(
            map_foreign_key_violation(err, TestError::HasDependencies, wrap),
            TestError::HasDependencies
        );
    }

    #[tokio::test]
    async fn test_other_errors_are_wrapped() {
        let pool = memory_pool().await;
        let err = sqlx::query("SELECT * FROM no_such_table")
            .execute(&pool)
            .await
            .unwrap_err();

        assert!(matches!(
            map_unique_violation(err, TestError::Duplicate, wrap),
            TestError::Database(_)
        ));
    }
}
