use zoneward_domain::{DomainError, RequestContext, Zone, ZoneMaster};

/// A zone that must be pulled again from one of `masters`.
#[derive(Debug, Clone)]
pub struct ZoneResyncTask {
    pub context: RequestContext,
    pub zone: Zone,
    pub masters: Vec<ZoneMaster>,
}

/// Hands zone resyncs to background workers.
///
/// Scheduling must not wait for the sync itself; an `Err` only means the
/// task could not be queued.
pub trait ZoneResyncScheduler: Send + Sync {
    fn schedule_resync(
        &self,
        context: &RequestContext,
        zone: &Zone,
        masters: Vec<ZoneMaster>,
    ) -> Result<(), DomainError>;
}
