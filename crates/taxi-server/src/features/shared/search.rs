//! Free-text filter shared by the list queries
//!
//! Each list endpoint filters one column by case-insensitive substring.
//! SQLite's `LIKE` already folds ASCII case, so the pattern only needs its
//! wildcards escaped to make `%` and `_` in the term match literally.
//! Case folding stops at ASCII: `ÉMILE` does not find `émile`.

use serde::Serialize;

/// Escape character used in every generated `LIKE ... ESCAPE` clause
pub const LIKE_ESCAPE: char = '\\';

/// The search box of one list view: which field it targets and what was typed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchFilter {
    pub field: &'static str,
    pub value: String,
}

impl SearchFilter {
    /// Build a filter from the raw query string value; surrounding whitespace is dropped
    pub fn new(field: &'static str, raw: Option<&str>) -> Self {
        Self {
            field,
            value: raw.map(str::trim).unwrap_or_default().to_string(),
        }
    }

    /// An empty term means "no filtering"
    pub fn is_active(&self) -> bool {
        !self.value.is_empty()
    }

    pub fn like_pattern(&self) -> Option<String> {
        self.is_active().then(|| contains_pattern(&self.value))
    }

    /// `WHERE` clause for `column`, with one placeholder when active
    pub fn where_clause(&self, column: &str) -> String {
        if self.is_active() {
            format!("WHERE {} LIKE ? ESCAPE '{}'", column, LIKE_ESCAPE)
        } else {
            String::new()
        }
    }
}

/// `%term%` with `%`, `_` and the escape character itself escaped
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("john"), "%john%");
        assert_eq!(contains_pattern("50%"), "%50\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c:\\"), "%c:\\\\%");
    }

    #[test]
    fn test_blank_filter_is_inactive() {
        for raw in [None, Some(""), Some("   ")] {
            let filter = SearchFilter::new("username", raw);
            assert!(!filter.is_active());
            assert_eq!(filter.like_pattern(), None);
            assert_eq!(filter.where_clause("username"), "");
        }
    }

    #[test]
    fn test_active_filter_trims_value() {
        let filter = SearchFilter::new("model", Some("  Model 3 "));
        assert_eq!(filter.value, "Model 3");
        assert_eq!(filter.where_clause("model"), "WHERE model LIKE ? ESCAPE '\\'");
    }

    #[tokio::test]
    async fn test_like_pattern_against_sqlite() {
        let pool = memory_pool().await;

        let matches = |value: &'static str, term: &'static str| {
            let pool = pool.clone();
            async move {
                let hit: bool = sqlx::query_scalar("SELECT ? LIKE ? ESCAPE '\\'")
                    .bind(value)
                    .bind(contains_pattern(term))
                    .fetch_one(&pool)
                    .await
                    .unwrap();
                hit
            }
        };

        assert!(matches("john_driver", "JOHN").await);
        assert!(matches("john_driver", "n_d").await);
        assert!(!matches("johnXdriver", "n_d").await);
        assert!(!matches("100 percent", "0%").await);
        assert!(matches("100% sure", "0%").await);
        assert!(matches("émile", "éMILE").await);
        assert!(!matches("émile", "ÉMILE").await);
    }
}
