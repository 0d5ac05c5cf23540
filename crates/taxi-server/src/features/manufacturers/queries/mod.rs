pub mod get;
pub mod list;

pub use get::{GetManufacturerError, GetManufacturerQuery};
pub use list::{ListManufacturersError, ListManufacturersQuery, MANUFACTURER_LIST_PATH};
