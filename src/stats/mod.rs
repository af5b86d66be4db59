pub mod metrics;
pub mod snapshot;

pub use metrics::SimulationMetrics;
pub use snapshot::{CreatureSnapshot, TileSnapshot};
