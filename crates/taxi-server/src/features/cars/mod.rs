pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{
    CreateCarCommand, CreateCarError, DeleteCarCommand, DeleteCarError, ToggleAssignCommand,
    ToggleAssignError, ToggleAssignResponse, UpdateCarCommand, UpdateCarError,
};

pub use queries::{CarDetail, GetCarError, GetCarQuery, ListCarsError, ListCarsQuery};

pub use routes::cars_routes;
