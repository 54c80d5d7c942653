mod sync_zone;

pub use sync_zone::SyncZoneUseCase;
