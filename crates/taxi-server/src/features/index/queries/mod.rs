pub mod stats;

pub use stats::{GetIndexStatsError, GetIndexStatsQuery, IndexStats};
