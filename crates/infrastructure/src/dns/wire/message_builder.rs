//! Outbound query messages for the remote SOA check and zone transfers.

use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name};
use std::str::FromStr;
use zoneward_domain::{DomainError, RecordType};

pub struct MessageBuilder;

impl MessageBuilder {
    /// Non-recursive single-question query with a random id. The id is
    /// returned alongside the bytes so the caller can match the reply.
    pub fn build_query_with_id(
        domain: &str,
        record_type: RecordType,
    ) -> Result<(u16, Vec<u8>), DomainError> {
        let name = Name::from_str(domain).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", domain, e))
        })?;

        let mut query = Query::query(name, RecordTypeMapper::to_hickory(record_type));
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);

        let mut message = Message::new();
        message
            .set_id(id)
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(false);
        message.add_query(query);

        let bytes = message.to_vec().map_err(|e| {
            DomainError::Codec(format!("Failed to serialize DNS message: {}", e))
        })?;
        Ok((id, bytes))
    }
}
