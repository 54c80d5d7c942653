pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use std::time::Duration;
use zoneward_domain::DomainError;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

/// One request, one response. Zone transfers read a stream of messages and
/// use the length-prefix helpers in [`tcp`] directly.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}

pub(crate) fn timeout_error(timeout: Duration) -> DomainError {
    DomainError::TransportTimeout(timeout.as_millis() as u64)
}
