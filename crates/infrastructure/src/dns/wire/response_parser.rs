use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{RData, Record};
use hickory_proto::serialize::binary::BinEncodable;
use std::fmt::Write;
use tracing::debug;
use zoneward_domain::{DomainError, RecordType};

#[derive(Debug, Clone)]
pub struct ParsedResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub truncated: bool,

    pub answers: Vec<Record>,
}

impl ParsedResponse {
    pub fn is_success(&self) -> bool {
        self.rcode == ResponseCode::NoError
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<ParsedResponse, DomainError> {
        let message = Message::from_vec(response_bytes)
            .map_err(|e| DomainError::Codec(format!("Failed to parse DNS response: {}", e)))?;

        let parsed = ParsedResponse {
            id: message.id(),
            rcode: message.response_code(),
            truncated: message.truncated(),
            answers: message.answers().to_vec(),
        };

        debug!(
            id = parsed.id,
            rcode = ?parsed.rcode,
            truncated = parsed.truncated,
            answers = parsed.answers.len(),
            "DNS response parsed"
        );

        Ok(parsed)
    }

    /// Serial of the first SOA in the answer section.
    pub fn soa_serial(response: &ParsedResponse) -> Result<u32, DomainError> {
        if !response.is_success() {
            return Err(DomainError::RemoteQuery(format!(
                "SOA query answered with {}",
                response.rcode
            )));
        }

        response
            .answers
            .iter()
            .find_map(|record| match record.data() {
                Some(RData::SOA(soa)) => Some(soa.serial()),
                _ => None,
            })
            .ok_or_else(|| DomainError::RemoteQuery("SOA query returned no SOA record".into()))
    }

    pub fn record_type(record: &Record) -> RecordType {
        RecordTypeMapper::from_hickory(record.record_type())
    }

    /// Presentation form of the record data, the same shape the store keeps.
    pub fn rdata_to_text(rdata: &RData) -> String {
        match rdata {
            RData::TXT(txt) => txt
                .txt_data()
                .iter()
                .map(|s| quote_character_string(s))
                .collect::<Vec<_>>()
                .join(" "),
            RData::Unknown { .. } => {
                let wire = rdata.to_bytes().unwrap_or_default();
                let mut text = format!("\\# {}", wire.len());
                if !wire.is_empty() {
                    text.push(' ');
                    for byte in &wire {
                        let _ = write!(text, "{:02x}", byte);
                    }
                }
                text
            }
            other => other.to_string(),
        }
    }
}

fn quote_character_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('"');
    for &b in bytes {
        match b {
            b'"' | b'\\' => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7e => out.push(b as char),
            _ => {
                let _ = write!(out, "\\{:03}", b);
            }
        }
    }
    out.push('"');
    out
}
