//! DNS wire codec between raw messages and the domain request/response model.

use std::net::SocketAddr;
use std::str::FromStr;

use hickory_proto::op::{Message, MessageType, Query};
use hickory_proto::rr::{Name, Record};
use hickory_proto::serialize::binary::BinEncodable;
use tracing::{debug, warn};
use zoneward_domain::{
    DomainError, OpCode, Question, Request, RequestContext, ResourceRecordSet, Response,
    ResponseCode,
};

use super::rdata_parser::RdataParser;
use super::record_type_map::RecordTypeMapper;

/// Classic DNS payload limit for UDP without EDNS.
pub const MAX_UDP_RESPONSE_SIZE: usize = 512;

const HEADER_LEN: usize = 12;
const QR_BIT: u16 = 0x8000;
const RD_BIT: u16 = 0x0100;

pub struct WireCodec;

impl WireCodec {
    pub fn decode(
        bytes: &[u8],
        source: SocketAddr,
        context: RequestContext,
    ) -> Result<Request, DomainError> {
        let message = Message::from_vec(bytes)
            .map_err(|e| DomainError::Codec(format!("Failed to parse DNS request: {}", e)))?;

        if message.message_type() != MessageType::Query {
            return Err(DomainError::MalformedRequest(
                "received a response where a request was expected".to_string(),
            ));
        }

        let mut request = Request::new(
            message.id(),
            RecordTypeMapper::opcode_from_hickory(message.op_code()),
            source,
        )
        .with_context(context);
        request.recursion_desired = message.recursion_desired();
        request.questions = message
            .queries()
            .iter()
            .map(|q| {
                Question::new(
                    &q.name().to_ascii(),
                    RecordTypeMapper::from_hickory(q.query_type()),
                    RecordTypeMapper::class_from_hickory(q.query_class()),
                )
            })
            .collect();

        Ok(request)
    }

    /// Single message carrying every answer.
    pub fn encode(response: &Response) -> Result<Vec<u8>, DomainError> {
        let mut message = Self::response_message(response, true)?;
        message.add_answers(Self::answer_records(&response.answers));
        Self::serialize(&message)
    }

    /// Falls back to a truncated, answer-less message when the full
    /// response exceeds `max_size`, so the client retries over TCP.
    pub fn encode_udp(response: &Response, max_size: usize) -> Result<Vec<u8>, DomainError> {
        let bytes = Self::encode(response)?;
        if bytes.len() <= max_size {
            return Ok(bytes);
        }

        debug!(
            size = bytes.len(),
            max_size,
            id = response.id,
            "UDP response truncated"
        );
        let mut message = Self::response_message(response, true)?;
        message.set_truncated(true);
        Self::serialize(&message)
    }

    /// Splits the answers over as many messages as needed to keep each one
    /// near `max_message_size`. Only the first message repeats the question.
    pub fn encode_stream(
        response: &Response,
        max_message_size: usize,
    ) -> Result<Vec<Vec<u8>>, DomainError> {
        let mut messages = Vec::new();
        let mut current = Self::response_message(response, true)?;
        let mut current_size = Self::serialize(&current)?.len();

        for record in Self::answer_records(&response.answers) {
            let record_size = record.to_bytes().map(|b| b.len()).unwrap_or(0);

            if !current.answers().is_empty() && current_size + record_size > max_message_size {
                messages.push(Self::serialize(&current)?);
                current = Self::response_message(response, false)?;
                current_size = HEADER_LEN;
            }

            current_size += record_size;
            current.add_answer(record);
        }

        messages.push(Self::serialize(&current)?);
        Ok(messages)
    }

    /// Bare 12-byte reply for messages that could not be decoded: REFUSED
    /// for opcodes this server does not speak, FORMERR for anything else.
    /// Returns `None` for fragments shorter than a header and for responses.
    pub fn header_only_response(request_bytes: &[u8]) -> Option<Vec<u8>> {
        if request_bytes.len() < HEADER_LEN {
            return None;
        }

        let flags = u16::from_be_bytes([request_bytes[2], request_bytes[3]]);
        if flags & QR_BIT != 0 {
            return None;
        }

        let opcode = ((flags >> 11) & 0x0f) as u8;
        let rcode = match OpCode::from_u8(opcode) {
            OpCode::Query | OpCode::Notify | OpCode::Status | OpCode::Update => {
                ResponseCode::FormErr
            }
            OpCode::IQuery | OpCode::Unknown(_) => ResponseCode::Refused,
        };

        let reply_flags = QR_BIT | ((opcode as u16) << 11) | (flags & RD_BIT) | rcode.to_u8() as u16;

        let mut header = vec![0u8; HEADER_LEN];
        header[0..2].copy_from_slice(&request_bytes[0..2]);
        header[2..4].copy_from_slice(&reply_flags.to_be_bytes());
        Some(header)
    }

    fn response_message(response: &Response, with_questions: bool) -> Result<Message, DomainError> {
        let opcode = RecordTypeMapper::opcode_to_hickory(response.opcode).ok_or_else(|| {
            DomainError::Codec(format!("Cannot encode opcode {}", response.opcode))
        })?;

        let mut message = Message::new();
        message
            .set_id(response.id)
            .set_message_type(MessageType::Response)
            .set_op_code(opcode)
            .set_authoritative(response.authoritative)
            .set_recursion_desired(response.recursion_desired)
            .set_response_code(RecordTypeMapper::rcode_to_hickory(response.rcode));

        if with_questions {
            for question in &response.questions {
                message.add_query(Self::to_query(question)?);
            }
        }

        Ok(message)
    }

    fn to_query(question: &Question) -> Result<Query, DomainError> {
        let name = Name::from_str(&question.name).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid name '{}': {}", question.name, e))
        })?;
        let mut query = Query::query(name, RecordTypeMapper::to_hickory(question.record_type));
        query.set_query_class(RecordTypeMapper::class_to_hickory(question.record_class));
        Ok(query)
    }

    /// Record data that cannot be parsed is skipped, never sent half-built.
    fn answer_records(answers: &[ResourceRecordSet]) -> Vec<Record> {
        let mut records = Vec::with_capacity(answers.iter().map(ResourceRecordSet::len).sum());

        for rrset in answers {
            let name = match Name::from_str(&rrset.name) {
                Ok(name) => name,
                Err(e) => {
                    warn!(name = %rrset.name, error = %e, "Skipping record set with invalid owner name");
                    continue;
                }
            };
            let class = RecordTypeMapper::class_to_hickory(rrset.record_class);

            for data in &rrset.data {
                match RdataParser::parse(rrset.record_type, data) {
                    Ok(rdata) => {
                        let mut record = Record::from_rdata(name.clone(), rrset.ttl, rdata);
                        record.set_dns_class(class);
                        records.push(record);
                    }
                    Err(e) => {
                        warn!(
                            name = %rrset.name,
                            record_type = %rrset.record_type,
                            error = %e,
                            "Skipping unparseable record data"
                        );
                    }
                }
            }
        }

        records
    }

    fn serialize(message: &Message) -> Result<Vec<u8>, DomainError> {
        message
            .to_vec()
            .map_err(|e| DomainError::Codec(format!("Failed to serialize DNS message: {}", e)))
    }
}
