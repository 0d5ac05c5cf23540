pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateManufacturerCommand, CreateManufacturerError};
pub use delete::{DeleteManufacturerCommand, DeleteManufacturerError};
pub use update::{UpdateManufacturerCommand, UpdateManufacturerError};
