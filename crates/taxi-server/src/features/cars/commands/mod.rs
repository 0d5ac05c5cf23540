pub mod create;
pub mod delete;
pub mod toggle_assign;
pub mod update;

pub use create::{CreateCarCommand, CreateCarError};
pub use delete::{DeleteCarCommand, DeleteCarError};
pub use toggle_assign::{ToggleAssignCommand, ToggleAssignError, ToggleAssignResponse};
pub use update::{UpdateCarCommand, UpdateCarError};
