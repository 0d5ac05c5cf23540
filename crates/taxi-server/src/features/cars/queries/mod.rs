pub mod get;
pub mod list;

pub use get::{CarDetail, GetCarError, GetCarQuery};
pub use list::{ListCarsError, ListCarsQuery, CAR_LIST_PATH};
