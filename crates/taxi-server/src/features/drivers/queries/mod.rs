pub mod get;
pub mod list;

pub use get::{DriverDetail, GetDriverError, GetDriverQuery};
pub use list::{ListDriversError, ListDriversQuery, DRIVER_LIST_PATH};
