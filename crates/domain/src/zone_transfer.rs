use std::sync::Arc;

use crate::dns_record::RecordType;

/// One record-set as received from a master during a zone transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferredRecordSet {
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub ttl: u32,
    pub data: Vec<Arc<str>>,
}

/// Complete zone contents pulled from a master.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferredZone {
    pub serial: u32,
    pub recordsets: Vec<TransferredRecordSet>,
}

impl TransferredZone {
    pub fn record_count(&self) -> usize {
        self.recordsets.iter().map(|rs| rs.data.len()).sum()
    }
}
