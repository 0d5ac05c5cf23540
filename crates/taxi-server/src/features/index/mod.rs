pub mod queries;
pub mod routes;

pub use queries::{GetIndexStatsError, GetIndexStatsQuery, IndexStats};

pub use routes::index_routes;
