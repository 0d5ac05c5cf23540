pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{
    CreateDriverCommand, CreateDriverError, DeleteDriverCommand, DeleteDriverError,
    UpdateLicenseCommand, UpdateLicenseError,
};

pub use queries::{DriverDetail, GetDriverError, GetDriverQuery, ListDriversError, ListDriversQuery};

pub use routes::drivers_routes;
