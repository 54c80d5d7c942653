use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use zoneward_domain::{
    OpCode, Question, Record, RecordAction, RecordClass, RecordSet, RecordType, Request,
    TransferredRecordSet, TransferredZone, Zone, ZoneMaster,
};

pub const DEFAULT_POOL: &str = "default-pool";
pub const MASTER_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1));

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

fn next_id(prefix: &str) -> String {
    format!("{}-{}", prefix, NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

pub fn client_addr() -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(198, 51, 100, 7)), 40000)
}

pub fn primary_zone(id: &str, name: &str) -> Zone {
    Zone::new(id, DEFAULT_POOL, name, 100, 3600)
}

pub fn secondary_zone(id: &str, name: &str, serial: u32) -> Zone {
    Zone::new(id, DEFAULT_POOL, name, serial, 3600)
        .secondary(vec![ZoneMaster::new(MASTER_IP, 53)])
}

// ── RecordSetBuilder ───────────────────────────────────────────────────────

pub struct RecordSetBuilder {
    zone_id: String,
    name: String,
    record_type: RecordType,
    ttl: Option<u32>,
    records: Vec<Record>,
}

impl RecordSetBuilder {
    pub fn new(zone_id: &str, name: &str, record_type: RecordType) -> Self {
        Self {
            zone_id: zone_id.to_string(),
            name: name.to_string(),
            record_type,
            ttl: None,
            records: Vec::new(),
        }
    }

    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn record(mut self, data: &str) -> Self {
        self.records
            .push(Record::new(next_id("rec"), data, RecordAction::None));
        self
    }

    pub fn pending_delete(mut self, data: &str) -> Self {
        self.records
            .push(Record::new(next_id("rec"), data, RecordAction::Delete));
        self
    }

    pub fn build(self) -> RecordSet {
        RecordSet::new(
            next_id("rs"),
            self.zone_id,
            &self.name,
            self.record_type,
            self.ttl,
        )
        .with_records(self.records)
    }
}

pub fn soa_recordset(zone_id: &str, zone_name: &str) -> RecordSet {
    RecordSetBuilder::new(zone_id, zone_name, RecordType::SOA)
        .record(&format!(
            "ns1.{} hostmaster.{} 100 3600 600 86400 3600",
            zone_name, zone_name
        ))
        .build()
}

// ── requests ───────────────────────────────────────────────────────────────

pub fn query_request(name: &str, record_type: RecordType) -> Request {
    Request::new(4242, OpCode::Query, client_addr())
        .with_question(Question::internet(name, record_type))
}

pub fn request_with_class(name: &str, record_type: RecordType, class: RecordClass) -> Request {
    Request::new(4242, OpCode::Query, client_addr())
        .with_question(Question::new(name, record_type, class))
}

pub fn notify_request(name: &str, from: IpAddr) -> Request {
    Request::new(77, OpCode::Notify, SocketAddr::new(from, 33333))
        .with_question(Question::internet(name, RecordType::SOA))
}

pub fn transferred_zone(serial: u32) -> TransferredZone {
    TransferredZone {
        serial,
        recordsets: vec![TransferredRecordSet {
            name: "www.example.org.".into(),
            record_type: RecordType::A,
            ttl: 300,
            data: vec!["192.0.2.80".into()],
        }],
    }
}
