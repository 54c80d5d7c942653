use super::{DnsServices, Repositories};
use std::sync::Arc;
use zoneward_application::services::CriteriaBuilder;
use zoneward_application::use_cases::{
    NotifyResponder, RecordQueryResponder, RequestDispatcher, SyncZoneUseCase,
    ZoneTransferResponder,
};
use zoneward_domain::Config;

pub struct UseCases {
    pub dispatcher: Arc<RequestDispatcher>,
    pub sync_zone: Arc<SyncZoneUseCase>,
}

impl UseCases {
    pub fn new(config: &Config, repos: &Repositories, dns: &DnsServices) -> Self {
        let criteria = CriteriaBuilder::new(config.handler.clone());

        let zone_transfer = Arc::new(ZoneTransferResponder::new(
            repos.zones.clone(),
            criteria.clone(),
        ));
        let record_query = Arc::new(RecordQueryResponder::new(repos.zones.clone(), criteria));
        let notify = Arc::new(NotifyResponder::new(
            repos.zones.clone(),
            dns.soa_query.clone(),
            dns.resync_queue.clone(),
        ));

        Self {
            dispatcher: Arc::new(RequestDispatcher::new(zone_transfer, record_query, notify)),
            sync_zone: Arc::new(SyncZoneUseCase::new(
                dns.transfer_client.clone(),
                repos.zones.clone(),
            )),
        }
    }
}
