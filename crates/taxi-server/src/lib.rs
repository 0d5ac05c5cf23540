//! Taxi Server Library
//!
//! HTTP server for managing a taxi fleet: manufacturers, cars and the
//! drivers who are also the service's users.
//!
//! # Overview
//!
//! - **Records**: manufacturers, cars and drivers in SQLite via SQLx
//! - **Views**: paginated, searchable lists plus detail and form endpoints
//! - **Access control**: every page except login requires a session cookie
//! - **Configuration**: environment-based, see [`config::Config`]
//!
//! # Architecture
//!
//! The server follows a **CQRS (Command Query Responsibility Segregation)** layout:
//!
//! - **Commands** (write operations) create, update, delete and toggle records.
//!   Form endpoints answer `POST` with a redirect on success.
//! - **Queries** (read operations) list and fetch records. Served on `GET`.
//!
//! Each feature under [`features`] carries its own commands, queries and
//! routes; [`cqrs::build_mediator`] registers every handler.
//!
//! # Example
//!
//! ```no_run
//! use taxi_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     api::serve(config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod cqrs;
pub mod db;
pub mod error;
pub mod features;
pub mod middleware;
pub mod models;

// Re-export commonly used types
pub use error::{AppError, ServerResult};
pub use features::AppState;
