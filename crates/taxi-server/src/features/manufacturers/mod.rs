pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{
    CreateManufacturerCommand, CreateManufacturerError, DeleteManufacturerCommand,
    DeleteManufacturerError, UpdateManufacturerCommand, UpdateManufacturerError,
};

pub use queries::{
    GetManufacturerError, GetManufacturerQuery, ListManufacturersError, ListManufacturersQuery,
};

pub use routes::manufacturers_routes;
