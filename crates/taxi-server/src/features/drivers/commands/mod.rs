pub mod create;
pub mod delete;
pub mod update_license;

pub use create::{CreateDriverCommand, CreateDriverError};
pub use delete::{DeleteDriverCommand, DeleteDriverError};
pub use update_license::{UpdateLicenseCommand, UpdateLicenseError};
