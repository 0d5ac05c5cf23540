//! Feature modules of the taxi service
//!
//! Every feature is a vertical slice with its own commands, queries and
//! routes.
//!
//! # Features
//!
//! - **accounts**: login and logout, the only public pages
//! - **index**: home page counters
//! - **manufacturers**: manufacturer list, search and forms
//! - **cars**: car list, detail, forms and driver assignment
//! - **drivers**: driver list, detail, registration and license updates
//!
//! # Architecture
//!
//! Each feature module follows the structure:
//! - `commands/` - Write operations (create, update, delete)
//! - `queries/` - Read operations (get, list)
//! - `routes.rs` - HTTP route definitions
//!
//! Commands and queries implement the mediator pattern using the `mediator` crate.

pub mod accounts;
pub mod cars;
pub mod drivers;
pub mod index;
pub mod manufacturers;
pub mod shared;

use axum::{extract::FromRef, Router};
use sqlx::SqlitePool;

use crate::config::{PaginationConfig, SessionConfig};
use crate::middleware::auth::LoginRequiredLayer;

/// Shared state for all feature routes
///
/// Handlers extract the part they need (`State<SqlitePool>`,
/// `State<PaginationConfig>`, ...) through [`FromRef`].
#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: SqlitePool,
    pub pagination: PaginationConfig,
    pub session: SessionConfig,
}

/// Creates the router with all feature routes mounted
///
/// Account routes are public; everything else sits behind the login gate.
pub fn router(state: AppState) -> Router<()> {
    let gated = Router::new()
        .merge(index::index_routes())
        .merge(manufacturers::manufacturers_routes())
        .merge(cars::cars_routes())
        .merge(drivers::drivers_routes())
        .route_layer(LoginRequiredLayer::new(state.db.clone()));

    Router::new()
        .merge(accounts::accounts_routes())
        .merge(gated)
        .with_state(state)
}
