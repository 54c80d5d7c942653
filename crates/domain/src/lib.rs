//! Zoneward domain layer: zones, record-sets, the request/response model
//! and the structured lookup filters shared by every other crate.
pub mod config;
pub mod criteria;
pub mod dns_record;
pub mod dns_request;
pub mod dns_response;
pub mod errors;
pub mod names;
pub mod recordset;
pub mod request_context;
pub mod tsig;
pub mod zone;
pub mod zone_transfer;

pub use config::{CliOverrides, Config, ConfigError, HandlerConfig};
pub use criteria::{RecordSetCriterion, TypeFilter, ZoneCriterion};
pub use dns_record::{RecordClass, RecordType};
pub use dns_request::{OpCode, Question, Request};
pub use dns_response::{ResourceRecordSet, Response, ResponseCode};
pub use errors::DomainError;
pub use names::{normalize_name, parse_name};
pub use recordset::{Record, RecordAction, RecordSet};
pub use request_context::RequestContext;
pub use tsig::{TsigKey, TsigScope};
pub use zone::{Zone, ZoneKind, ZoneMaster};
pub use zone_transfer::{TransferredRecordSet, TransferredZone};
