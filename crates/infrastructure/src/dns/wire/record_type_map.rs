//! Mapping between `zoneward_domain` protocol enums and their hickory
//! counterparts. Conversions go through the IANA codes so unknown values
//! survive in both directions.

use hickory_proto::op::{OpCode as HickoryOpCode, ResponseCode as HickoryResponseCode};
use hickory_proto::rr::{DNSClass, RecordType as HickoryRecordType};
use zoneward_domain::{OpCode, RecordClass, RecordType, ResponseCode};

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn to_hickory(record_type: RecordType) -> HickoryRecordType {
        HickoryRecordType::from(record_type.to_u16())
    }

    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        RecordType::from_u16(u16::from(hickory_type))
    }

    pub fn class_to_hickory(class: RecordClass) -> DNSClass {
        match class {
            RecordClass::IN => DNSClass::IN,
            RecordClass::CH => DNSClass::CH,
            RecordClass::HS => DNSClass::HS,
            RecordClass::NONE => DNSClass::NONE,
            RecordClass::ANY => DNSClass::ANY,
            RecordClass::Unknown(code) => DNSClass::from_u16(code).unwrap_or(DNSClass::IN),
        }
    }

    pub fn class_from_hickory(class: DNSClass) -> RecordClass {
        RecordClass::from_u16(u16::from(class))
    }

    pub fn opcode_from_hickory(opcode: HickoryOpCode) -> OpCode {
        OpCode::from_u8(u8::from(opcode))
    }

    /// `None` for opcodes hickory cannot encode; those responses are
    /// written as a bare header instead.
    pub fn opcode_to_hickory(opcode: OpCode) -> Option<HickoryOpCode> {
        match opcode {
            OpCode::Query => Some(HickoryOpCode::Query),
            OpCode::Status => Some(HickoryOpCode::Status),
            OpCode::Notify => Some(HickoryOpCode::Notify),
            OpCode::Update => Some(HickoryOpCode::Update),
            OpCode::IQuery | OpCode::Unknown(_) => None,
        }
    }

    pub fn rcode_to_hickory(rcode: ResponseCode) -> HickoryResponseCode {
        match rcode {
            ResponseCode::NoError => HickoryResponseCode::NoError,
            ResponseCode::FormErr => HickoryResponseCode::FormErr,
            ResponseCode::ServFail => HickoryResponseCode::ServFail,
            ResponseCode::NXDomain => HickoryResponseCode::NXDomain,
            ResponseCode::NotImp => HickoryResponseCode::NotImp,
            ResponseCode::Refused => HickoryResponseCode::Refused,
            ResponseCode::NotAuth => HickoryResponseCode::NotAuth,
        }
    }
}
