pub mod commands;
pub mod routes;

pub use commands::{LoginCommand, LoginError, LoginResponse, LogoutCommand, LogoutError};

pub use routes::accounts_routes;
