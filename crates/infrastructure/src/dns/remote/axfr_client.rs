use crate::dns::transport::tcp::{read_with_length_prefix, send_with_length_prefix, TcpTransport};
use crate::dns::transport::timeout_error;
use crate::dns::wire::{MessageBuilder, ResponseParser};
use async_trait::async_trait;
use hickory_proto::rr::{RData, Record};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::{debug, info, instrument};
use zoneward_application::ports::ZoneTransferClient;
use zoneward_domain::{
    normalize_name, DomainError, RecordType, TransferredRecordSet, TransferredZone, ZoneMaster,
};

/// Pulls zones from masters with a full AXFR over TCP.
pub struct AxfrZoneTransferClient {
    timeout: Duration,
}

impl AxfrZoneTransferClient {
    /// `timeout` bounds the whole transfer, not each message.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn receive(
        stream: &mut TcpStream,
        query_id: u16,
        zone_name: &str,
        master: ZoneMaster,
    ) -> Result<TransferredZone, DomainError> {
        let mut collector = TransferCollector::default();

        while !collector.complete {
            let bytes = read_with_length_prefix(stream).await?;
            let response = ResponseParser::parse(&bytes)?;

            if response.id != query_id {
                return Err(DomainError::ZoneTransferFailed(format!(
                    "{} answered transfer of {} with unexpected id {}",
                    master, zone_name, response.id
                )));
            }
            if !response.is_success() {
                return Err(DomainError::ZoneTransferFailed(format!(
                    "{} answered transfer of {} with {}",
                    master, zone_name, response.rcode
                )));
            }

            for record in &response.answers {
                collector.push(record)?;
                if collector.complete {
                    break;
                }
            }
        }

        collector.finish()
    }
}

#[async_trait]
impl ZoneTransferClient for AxfrZoneTransferClient {
    #[instrument(skip(self), fields(master = %master))]
    async fn fetch_zone(
        &self,
        zone_name: &str,
        master: ZoneMaster,
    ) -> Result<TransferredZone, DomainError> {
        let (query_id, query) = MessageBuilder::build_query_with_id(zone_name, RecordType::AXFR)?;

        let transport = TcpTransport::new(master.socket_addr());
        let mut stream = transport.connect(self.timeout).await?;

        let transfer = async {
            send_with_length_prefix(&mut stream, &query).await?;
            debug!(zone = %zone_name, "AXFR query sent");
            Self::receive(&mut stream, query_id, zone_name, master).await
        };

        let zone = tokio::time::timeout(self.timeout, transfer)
            .await
            .map_err(|_| timeout_error(self.timeout))??;

        info!(
            zone = %zone_name,
            serial = zone.serial,
            recordsets = zone.recordsets.len(),
            records = zone.record_count(),
            "Zone transfer received"
        );

        Ok(zone)
    }
}

/// Groups streamed records by owner and type in arrival order. The stream
/// opens with the zone SOA and closes with the next SOA.
#[derive(Default)]
struct TransferCollector {
    serial: Option<u32>,
    recordsets: Vec<TransferredRecordSet>,
    index: HashMap<(Arc<str>, RecordType), usize>,
    complete: bool,
}

impl TransferCollector {
    fn push(&mut self, record: &Record) -> Result<(), DomainError> {
        let Some(rdata) = record.data() else {
            return Ok(());
        };
        let record_type = ResponseParser::record_type(record);

        match (self.serial, rdata) {
            (None, RData::SOA(soa)) => self.serial = Some(soa.serial()),
            (None, _) => {
                return Err(DomainError::ZoneTransferFailed(format!(
                    "transfer opened with {} instead of SOA",
                    record_type
                )))
            }
            (Some(_), RData::SOA(_)) => {
                self.complete = true;
                return Ok(());
            }
            (Some(_), _) => {}
        }

        let name: Arc<str> = normalize_name(&record.name().to_ascii()).into();
        let data: Arc<str> = ResponseParser::rdata_to_text(rdata).into();

        match self.index.get(&(name.clone(), record_type)) {
            Some(&position) => {
                let rrset = &mut self.recordsets[position];
                if !rrset.data.contains(&data) {
                    rrset.data.push(data);
                }
            }
            None => {
                self.index
                    .insert((name.clone(), record_type), self.recordsets.len());
                self.recordsets.push(TransferredRecordSet {
                    name,
                    record_type,
                    ttl: record.ttl(),
                    data: vec![data],
                });
            }
        }

        Ok(())
    }

    fn finish(self) -> Result<TransferredZone, DomainError> {
        let serial = self.serial.ok_or_else(|| {
            DomainError::ZoneTransferFailed("transfer ended before the opening SOA".into())
        })?;

        Ok(TransferredZone {
            serial,
            recordsets: self.recordsets,
        })
    }
}
