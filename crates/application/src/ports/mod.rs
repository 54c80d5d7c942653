mod remote_soa_query;
mod zone_content_writer;
mod zone_repository;
mod zone_resync_scheduler;
mod zone_transfer_client;

pub use remote_soa_query::RemoteSoaQuery;
pub use zone_content_writer::ZoneContentWriter;
pub use zone_repository::ZoneRepository;
pub use zone_resync_scheduler::{ZoneResyncScheduler, ZoneResyncTask};
pub use zone_transfer_client::ZoneTransferClient;
