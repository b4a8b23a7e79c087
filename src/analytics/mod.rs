mod stats;

pub use stats::{ReadingStats, TopBook};
