use async_trait::async_trait;
use std::net::SocketAddr;
use zoneward_domain::DomainError;

#[async_trait]
pub trait RemoteSoaQuery: Send + Sync {
    /// Asks `server` for the SOA of `zone_name` and returns its serial.
    async fn query_soa_serial(&self, server: SocketAddr, zone_name: &str)
        -> Result<u32, DomainError>;
}
