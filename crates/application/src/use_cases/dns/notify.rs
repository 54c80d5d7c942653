use std::sync::Arc;

use tracing::{error, info, warn};
use zoneward_domain::{DomainError, Request, Response, ResponseCode, ZoneCriterion};

use super::failure_response;
use crate::ports::{RemoteSoaQuery, ZoneRepository, ZoneResyncScheduler};

/// Handles NOTIFY for secondary zones.
///
/// The notifying master is asked for its SOA serial; when it differs from
/// the stored one a resync against that master is queued. The response
/// never waits for the resync.
pub struct NotifyResponder {
    repository: Arc<dyn ZoneRepository>,
    soa_query: Arc<dyn RemoteSoaQuery>,
    scheduler: Arc<dyn ZoneResyncScheduler>,
}

impl NotifyResponder {
    pub fn new(
        repository: Arc<dyn ZoneRepository>,
        soa_query: Arc<dyn RemoteSoaQuery>,
        scheduler: Arc<dyn ZoneResyncScheduler>,
    ) -> Self {
        Self {
            repository,
            soa_query,
            scheduler,
        }
    }

    pub async fn handle(&self, request: &Request) -> Response {
        let Some(question) = request.single_question() else {
            return Response::error(request, ResponseCode::FormErr);
        };
        let context = &request.context;

        let zone = match self
            .repository
            .find_zone(context, &ZoneCriterion::secondary_by_name(&question.name))
            .await
        {
            Ok(zone) => zone,
            Err(DomainError::ZoneNotFound(_)) => {
                info!(zone = %question.name, "NOTIFY for unknown secondary zone");
                return Response::error(request, ResponseCode::NotAuth);
            }
            Err(e) => return failure_response(request, &e, "notify"),
        };

        let sender = request.source.ip();
        let Some(master) = zone.master_for(sender) else {
            warn!(zone = %zone.name, addr = %sender, "NOTIFY from non-master server, ignoring");
            return Response::refused(request);
        };

        let remote_serial = match self
            .soa_query
            .query_soa_serial(master.socket_addr(), &zone.name)
            .await
        {
            Ok(serial) => serial,
            Err(e) => {
                error!(error = %e, zone = %zone.name, master = %master, "SOA query to notifying master failed");
                return Response::error(request, ResponseCode::ServFail);
            }
        };

        if remote_serial == zone.serial {
            info!(
                serial = remote_serial,
                zone_id = %zone.id,
                "Serial is the same for master and us"
            );
        } else {
            info!(
                zone_id = %zone.id,
                master = %master,
                local_serial = zone.serial,
                remote_serial,
                "Scheduling AXFR"
            );
            if let Err(e) = self.scheduler.schedule_resync(context, &zone, vec![master]) {
                warn!(error = %e, zone_id = %zone.id, "Could not schedule zone resync");
            }
        }

        let mut response = Response::for_request(request);
        response.authoritative = true;
        response
    }
}
