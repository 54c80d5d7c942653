use sqlx::SqlitePool;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use zoneward_application::ports::ZoneResyncScheduler;
use zoneward_application::services::CriteriaBuilder;
use zoneward_application::use_cases::{
    NotifyResponder, RecordQueryResponder, RequestDispatcher, ZoneTransferResponder,
};
use zoneward_domain::{DomainError, HandlerConfig, RequestContext, Zone, ZoneMaster};
use zoneward_infrastructure::dns::{DnsRequestHandler, UdpSoaQuery};
use zoneward_infrastructure::repositories::SqliteZoneRepository;

#[derive(Default)]
pub struct RecordingScheduler {
    scheduled: Mutex<Vec<(String, Vec<ZoneMaster>)>>,
}

impl RecordingScheduler {
    pub fn scheduled(&self) -> Vec<(String, Vec<ZoneMaster>)> {
        self.scheduled.lock().unwrap().clone()
    }
}

impl ZoneResyncScheduler for RecordingScheduler {
    fn schedule_resync(
        &self,
        _context: &RequestContext,
        zone: &Zone,
        masters: Vec<ZoneMaster>,
    ) -> Result<(), DomainError> {
        self.scheduled
            .lock()
            .unwrap()
            .push((zone.id.to_string(), masters));
        Ok(())
    }
}

pub fn build_handler(
    pool: SqlitePool,
    scheduler: Arc<RecordingScheduler>,
    tcp_max_message_size: usize,
) -> DnsRequestHandler {
    let repository = Arc::new(SqliteZoneRepository::new(pool));
    let criteria = CriteriaBuilder::new(HandlerConfig::default());

    let dispatcher = RequestDispatcher::new(
        Arc::new(ZoneTransferResponder::new(repository.clone(), criteria.clone())),
        Arc::new(RecordQueryResponder::new(repository.clone(), criteria)),
        Arc::new(NotifyResponder::new(
            repository,
            Arc::new(UdpSoaQuery::new(Duration::from_millis(300), 0)),
            scheduler,
        )),
    );

    DnsRequestHandler::new(Arc::new(dispatcher), tcp_max_message_size)
}
