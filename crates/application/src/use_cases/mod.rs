pub mod dns;
pub mod zones;

pub use dns::{NotifyResponder, RecordQueryResponder, RequestDispatcher, ZoneTransferResponder};
pub use zones::SyncZoneUseCase;
