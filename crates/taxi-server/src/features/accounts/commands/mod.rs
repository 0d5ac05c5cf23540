pub mod login;
pub mod logout;

pub use login::{LoginCommand, LoginError, LoginResponse};
pub use logout::{LogoutCommand, LogoutError};
