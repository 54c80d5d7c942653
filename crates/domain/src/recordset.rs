use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::dns_record::RecordType;
use crate::errors::DomainError;
use crate::names::normalize_name;

/// Pending lifecycle action of a stored record. `Delete` marks a record that
/// is still stored but must no longer be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordAction {
    None,
    Create,
    Update,
    Delete,
}

impl RecordAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordAction::None => "NONE",
            RecordAction::Create => "CREATE",
            RecordAction::Update => "UPDATE",
            RecordAction::Delete => "DELETE",
        }
    }
}

impl fmt::Display for RecordAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NONE" => Ok(RecordAction::None),
            "CREATE" => Ok(RecordAction::Create),
            "UPDATE" => Ok(RecordAction::Update),
            "DELETE" => Ok(RecordAction::Delete),
            _ => Err(DomainError::InvalidRecordData(format!(
                "Unknown record action: {}",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: Arc<str>,
    pub data: Arc<str>,
    pub action: RecordAction,
}

impl Record {
    pub fn new(id: impl Into<Arc<str>>, data: impl Into<Arc<str>>, action: RecordAction) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
            action,
        }
    }

    pub fn is_pending_delete(&self) -> bool {
        self.action == RecordAction::Delete
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    pub id: Arc<str>,
    pub zone_id: Arc<str>,
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub ttl: Option<u32>,
    pub records: Vec<Record>,
}

impl RecordSet {
    pub fn new(
        id: impl Into<Arc<str>>,
        zone_id: impl Into<Arc<str>>,
        name: &str,
        record_type: RecordType,
        ttl: Option<u32>,
    ) -> Self {
        Self {
            id: id.into(),
            zone_id: zone_id.into(),
            name: Arc::from(normalize_name(name)),
            record_type,
            ttl,
            records: Vec::new(),
        }
    }

    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = records;
        self
    }
}
