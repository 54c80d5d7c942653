use async_trait::async_trait;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use zoneward_application::ports::{ZoneContentWriter, ZoneTransferClient};
use zoneward_application::use_cases::SyncZoneUseCase;
use zoneward_domain::{
    DomainError, RequestContext, TransferredZone, Zone, ZoneMaster,
};

/// Fails the first `failures` transfers, then returns a zone with `serial`.
pub struct FlakyTransferClient {
    failures: usize,
    serial: u32,
    calls: AtomicUsize,
}

impl FlakyTransferClient {
    pub fn new(failures: usize, serial: u32) -> Self {
        Self {
            failures,
            serial,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ZoneTransferClient for FlakyTransferClient {
    async fn fetch_zone(
        &self,
        _zone_name: &str,
        _master: ZoneMaster,
    ) -> Result<TransferredZone, DomainError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(DomainError::TransportTimeout(10));
        }
        Ok(TransferredZone {
            serial: self.serial,
            recordsets: Vec::new(),
        })
    }
}

#[derive(Default)]
pub struct RecordingWriter {
    writes: Mutex<Vec<(String, u32)>>,
}

impl RecordingWriter {
    pub fn writes(&self) -> Vec<(String, u32)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ZoneContentWriter for RecordingWriter {
    async fn replace_zone_contents(
        &self,
        _context: &RequestContext,
        zone_id: &str,
        transferred: &TransferredZone,
    ) -> Result<(), DomainError> {
        self.writes
            .lock()
            .unwrap()
            .push((zone_id.to_string(), transferred.serial));
        Ok(())
    }
}

pub fn master() -> ZoneMaster {
    ZoneMaster::new(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)), 53)
}

pub fn secondary_zone(id: &str, name: &str) -> Zone {
    Zone::new(id, "pool", name, 1, 3600).secondary(vec![master()])
}

pub fn sync_use_case(
    client: Arc<FlakyTransferClient>,
    writer: Arc<RecordingWriter>,
) -> Arc<SyncZoneUseCase> {
    Arc::new(SyncZoneUseCase::new(client, writer))
}

pub async fn wait_until<F: Fn() -> bool>(condition: F) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
