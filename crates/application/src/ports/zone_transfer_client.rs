use async_trait::async_trait;
use zoneward_domain::{DomainError, TransferredZone, ZoneMaster};

#[async_trait]
pub trait ZoneTransferClient: Send + Sync {
    /// Pulls the complete contents of `zone_name` from `master`.
    async fn fetch_zone(
        &self,
        zone_name: &str,
        master: ZoneMaster,
    ) -> Result<TransferredZone, DomainError>;
}
