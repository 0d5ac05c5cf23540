//! Taxi Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling and logging setup for the taxi service workspace.
//!
//! - **Error Handling**: [`TaxiError`] and the [`Result`] alias
//! - **Logging**: [`logging::init_logging`] configured from `LOG_*` variables
//!
//! # Example
//!
//! ```no_run
//! use taxi_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> taxi_common::Result<()> {
//!     let config = LogConfig::from_env().map_err(|e| taxi_common::TaxiError::Config(e.to_string()))?;
//!     init_logging(&config).map_err(|e| taxi_common::TaxiError::Config(e.to_string()))?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;

pub use error::{Result, TaxiError};
