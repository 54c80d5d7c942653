use async_trait::async_trait;
use zoneward_domain::{DomainError, RequestContext, TransferredZone};

#[async_trait]
pub trait ZoneContentWriter: Send + Sync {
    /// Replaces every record-set of `zone_id` and its serial with the
    /// transferred contents, atomically.
    async fn replace_zone_contents(
        &self,
        context: &RequestContext,
        zone_id: &str,
        transferred: &TransferredZone,
    ) -> Result<(), DomainError>;
}
