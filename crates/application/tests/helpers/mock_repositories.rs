use async_trait::async_trait;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use zoneward_application::ports::{
    RemoteSoaQuery, ZoneContentWriter, ZoneRepository, ZoneResyncScheduler, ZoneTransferClient,
};
use zoneward_domain::{
    DomainError, RecordSet, RecordSetCriterion, RequestContext, TransferredZone, Zone,
    ZoneCriterion, ZoneMaster,
};

// ── MockZoneRepository ─────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockZoneRepository {
    zones: Arc<Mutex<Vec<Zone>>>,
    recordsets: Arc<Mutex<Vec<RecordSet>>>,
    zone_criteria: Arc<Mutex<Vec<ZoneCriterion>>>,
    failure: Arc<Mutex<Option<DomainError>>>,
}

impl MockZoneRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_zone(&self, zone: Zone) {
        self.zones.lock().unwrap().push(zone);
    }

    pub fn add_recordset(&self, recordset: RecordSet) {
        self.recordsets.lock().unwrap().push(recordset);
    }

    pub fn fail_with(&self, error: DomainError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    /// Every zone criterion passed to `find_zone`, in call order.
    pub fn zone_criteria(&self) -> Vec<ZoneCriterion> {
        self.zone_criteria.lock().unwrap().clone()
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        match self.failure.lock().unwrap().clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn matching_recordsets(&self, criterion: &RecordSetCriterion) -> Vec<RecordSet> {
        let zones = self.zones.lock().unwrap();
        self.recordsets
            .lock()
            .unwrap()
            .iter()
            .filter(|rs| {
                zones
                    .iter()
                    .find(|z| z.id == rs.zone_id)
                    .is_some_and(|z| criterion.matches(rs, z))
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ZoneRepository for MockZoneRepository {
    async fn find_zone(
        &self,
        _context: &RequestContext,
        criterion: &ZoneCriterion,
    ) -> Result<Zone, DomainError> {
        self.zone_criteria.lock().unwrap().push(criterion.clone());
        self.check_failure()?;

        let matches: Vec<Zone> = self
            .zones
            .lock()
            .unwrap()
            .iter()
            .filter(|z| criterion.matches(z))
            .cloned()
            .collect();

        match matches.len() {
            0 => Err(DomainError::ZoneNotFound(format!("{:?}", criterion))),
            1 => Ok(matches.into_iter().next().unwrap()),
            n => Err(DomainError::DatabaseError(format!("{} zones matched", n))),
        }
    }

    async fn find_recordset(
        &self,
        _context: &RequestContext,
        criterion: &RecordSetCriterion,
    ) -> Result<RecordSet, DomainError> {
        self.check_failure()?;
        self.matching_recordsets(criterion)
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::RecordSetNotFound(format!("{:?}", criterion)))
    }

    async fn find_recordsets(
        &self,
        _context: &RequestContext,
        criterion: &RecordSetCriterion,
    ) -> Result<Vec<RecordSet>, DomainError> {
        self.check_failure()?;
        Ok(self.matching_recordsets(criterion))
    }
}

// ── MockRemoteSoaQuery ─────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockRemoteSoaQuery {
    serial: Arc<Mutex<Option<u32>>>,
    error: Arc<Mutex<Option<DomainError>>>,
    queries: Arc<Mutex<Vec<(SocketAddr, String)>>>,
}

impl MockRemoteSoaQuery {
    pub fn with_serial(serial: u32) -> Self {
        let mock = Self::default();
        *mock.serial.lock().unwrap() = Some(serial);
        mock
    }

    pub fn failing(error: DomainError) -> Self {
        let mock = Self::default();
        *mock.error.lock().unwrap() = Some(error);
        mock
    }

    pub fn queries(&self) -> Vec<(SocketAddr, String)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteSoaQuery for MockRemoteSoaQuery {
    async fn query_soa_serial(
        &self,
        server: SocketAddr,
        zone_name: &str,
    ) -> Result<u32, DomainError> {
        self.queries
            .lock()
            .unwrap()
            .push((server, zone_name.to_string()));

        if let Some(e) = self.error.lock().unwrap().clone() {
            return Err(e);
        }
        self.serial
            .lock()
            .unwrap()
            .ok_or_else(|| DomainError::RemoteQuery("no serial configured".to_string()))
    }
}

// ── MockResyncScheduler ────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockResyncScheduler {
    scheduled: Arc<Mutex<Vec<(String, Vec<ZoneMaster>)>>>,
    reject: Arc<Mutex<bool>>,
}

impl MockResyncScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        let mock = Self::default();
        *mock.reject.lock().unwrap() = true;
        mock
    }

    /// `(zone id, masters)` for every accepted schedule call.
    pub fn scheduled(&self) -> Vec<(String, Vec<ZoneMaster>)> {
        self.scheduled.lock().unwrap().clone()
    }
}

impl ZoneResyncScheduler for MockResyncScheduler {
    fn schedule_resync(
        &self,
        _context: &RequestContext,
        zone: &Zone,
        masters: Vec<ZoneMaster>,
    ) -> Result<(), DomainError> {
        if *self.reject.lock().unwrap() {
            return Err(DomainError::SchedulerUnavailable("queue full".to_string()));
        }
        self.scheduled
            .lock()
            .unwrap()
            .push((zone.id.to_string(), masters));
        Ok(())
    }
}

// ── MockZoneTransferClient ─────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockZoneTransferClient {
    results: Arc<Mutex<HashMap<SocketAddr, Result<TransferredZone, DomainError>>>>,
    calls: Arc<Mutex<Vec<ZoneMaster>>>,
}

impl MockZoneTransferClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_result(&self, master: ZoneMaster, result: Result<TransferredZone, DomainError>) {
        self.results
            .lock()
            .unwrap()
            .insert(master.socket_addr(), result);
    }

    pub fn calls(&self) -> Vec<ZoneMaster> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ZoneTransferClient for MockZoneTransferClient {
    async fn fetch_zone(
        &self,
        _zone_name: &str,
        master: ZoneMaster,
    ) -> Result<TransferredZone, DomainError> {
        self.calls.lock().unwrap().push(master);
        self.results
            .lock()
            .unwrap()
            .get(&master.socket_addr())
            .cloned()
            .unwrap_or_else(|| {
                Err(DomainError::TransportTimeout(1000))
            })
    }
}

// ── MockZoneContentWriter ──────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockZoneContentWriter {
    writes: Arc<Mutex<Vec<(String, TransferredZone)>>>,
    failure: Arc<Mutex<Option<DomainError>>>,
}

impl MockZoneContentWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_with(&self, error: DomainError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn writes(&self) -> Vec<(String, TransferredZone)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ZoneContentWriter for MockZoneContentWriter {
    async fn replace_zone_contents(
        &self,
        _context: &RequestContext,
        zone_id: &str,
        transferred: &TransferredZone,
    ) -> Result<(), DomainError> {
        if let Some(e) = self.failure.lock().unwrap().clone() {
            return Err(e);
        }
        self.writes
            .lock()
            .unwrap()
            .push((zone_id.to_string(), transferred.clone()));
        Ok(())
    }
}
