use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use zoneward_domain::Config;
use zoneward_infrastructure::dns::{AxfrZoneTransferClient, UdpSoaQuery};
use zoneward_jobs::{ZoneResyncQueue, ZoneResyncReceiver};

/// Remote-facing adapters and the resync hand-off.
pub struct DnsServices {
    pub soa_query: Arc<UdpSoaQuery>,
    pub transfer_client: Arc<AxfrZoneTransferClient>,
    pub resync_queue: Arc<ZoneResyncQueue>,
    pub resync_receiver: ZoneResyncReceiver,
}

impl DnsServices {
    pub fn new(config: &Config) -> Self {
        let remote = &config.remote;
        let soa_query = Arc::new(UdpSoaQuery::new(
            Duration::from_millis(remote.timeout_ms),
            remote.retries,
        ));
        let transfer_client = Arc::new(AxfrZoneTransferClient::new(Duration::from_secs(
            remote.transfer_timeout_secs,
        )));

        let (queue, resync_receiver) = ZoneResyncQueue::bounded(
            config.resync.queue_capacity,
            config.resync.coalesce_pending,
        );

        info!(
            queue_capacity = config.resync.queue_capacity,
            coalesce = config.resync.coalesce_pending,
            soa_timeout_ms = remote.timeout_ms,
            "Remote DNS services ready"
        );

        Self {
            soa_query,
            transfer_client,
            resync_queue: Arc::new(queue),
            resync_receiver,
        }
    }
}
