//! Authentication primitives
//!
//! - **password**: Argon2id hashing and verification
//! - **session**: server-side sessions keyed by the `sessionid` cookie
//!
//! The HTTP side (login/logout endpoints, the login gate) lives in
//! `features::accounts` and `middleware::auth`.

pub mod password;
pub mod session;

pub use session::AuthSession;
