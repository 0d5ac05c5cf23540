//! Shared utilities and types for feature modules
//!
//! # Contents
//!
//! - **pagination**: page resolution and the list view context
//! - **search**: the substring filter behind every list endpoint
//! - **validation**: field validators and the `FieldErrors` map
//! - **forms**: form contexts rendered by create/update views
//! - **error_helpers**: Database error handling utilities
//! - **test_helpers**: Test fixtures and utilities (test-only)

pub mod error_helpers;
pub mod forms;
pub mod pagination;
pub mod search;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;

// Re-export commonly used types
pub use forms::FormContext;
pub use pagination::{InvalidPage, ListPage, PageObj};
pub use search::SearchFilter;
pub use validation::{FieldErrors, NON_FIELD_ERRORS};
