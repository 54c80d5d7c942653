use crate::dns::transport::tcp::TcpTransport;
use crate::dns::transport::udp::UdpTransport;
use crate::dns::transport::DnsTransport;
use crate::dns::wire::{MessageBuilder, ParsedResponse, ResponseParser};
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, instrument};
use zoneward_application::ports::RemoteSoaQuery;
use zoneward_domain::{DomainError, RecordType};

/// SOA lookups against a master over UDP, retried on timeout and repeated
/// over TCP when the reply comes back truncated.
pub struct UdpSoaQuery {
    timeout: Duration,
    retries: u32,
}

impl UdpSoaQuery {
    pub fn new(timeout: Duration, retries: u32) -> Self {
        Self { timeout, retries }
    }

    async fn query_once(&self, server: SocketAddr, zone_name: &str) -> Result<u32, DomainError> {
        let (id, query) = MessageBuilder::build_query_with_id(zone_name, RecordType::SOA)?;

        let reply = UdpTransport::new(server).send(&query, self.timeout).await?;
        let mut response = Self::parse_matching(&reply.bytes, id)?;

        if response.truncated {
            debug!(server = %server, "Truncated SOA reply, retrying over TCP");
            let reply = TcpTransport::new(server).send(&query, self.timeout).await?;
            response = Self::parse_matching(&reply.bytes, id)?;
        }

        ResponseParser::soa_serial(&response)
    }

    fn parse_matching(bytes: &[u8], expected_id: u16) -> Result<ParsedResponse, DomainError> {
        let response = ResponseParser::parse(bytes)?;
        if response.id != expected_id {
            return Err(DomainError::RemoteQuery(format!(
                "Response id {} does not match query id {}",
                response.id, expected_id
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl RemoteSoaQuery for UdpSoaQuery {
    #[instrument(skip(self))]
    async fn query_soa_serial(
        &self,
        server: SocketAddr,
        zone_name: &str,
    ) -> Result<u32, DomainError> {
        let mut attempt = 0;
        loop {
            match self.query_once(server, zone_name).await {
                Err(DomainError::TransportTimeout(ms)) if attempt < self.retries => {
                    attempt += 1;
                    debug!(attempt, timeout_ms = ms, "SOA query timed out, retrying");
                }
                result => return result,
            }
        }
    }
}
