pub mod resync_queue;
pub mod runner;
pub mod zone_resync;

pub use resync_queue::{ZoneResyncQueue, ZoneResyncReceiver};
pub use runner::JobRunner;
pub use zone_resync::ZoneResyncJob;
