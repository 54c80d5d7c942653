use std::sync::Arc;

use tracing::{info, warn};
use zoneward_domain::{DomainError, RequestContext, Zone, ZoneMaster};

use crate::ports::{ZoneContentWriter, ZoneTransferClient};

/// Pulls a secondary zone from its masters and stores the result.
pub struct SyncZoneUseCase {
    transfer_client: Arc<dyn ZoneTransferClient>,
    writer: Arc<dyn ZoneContentWriter>,
}

impl SyncZoneUseCase {
    pub fn new(
        transfer_client: Arc<dyn ZoneTransferClient>,
        writer: Arc<dyn ZoneContentWriter>,
    ) -> Self {
        Self {
            transfer_client,
            writer,
        }
    }

    /// Tries `masters` in order and returns the serial that was stored.
    pub async fn execute(
        &self,
        context: &RequestContext,
        zone: &Zone,
        masters: &[ZoneMaster],
    ) -> Result<u32, DomainError> {
        let mut last_error = None;

        for master in masters {
            match self.transfer_client.fetch_zone(&zone.name, *master).await {
                Ok(transferred) => {
                    self.writer
                        .replace_zone_contents(context, &zone.id, &transferred)
                        .await?;

                    info!(
                        zone = %zone.name,
                        master = %master,
                        serial = transferred.serial,
                        records = transferred.record_count(),
                        "Zone synchronized"
                    );
                    return Ok(transferred.serial);
                }
                Err(e) => {
                    warn!(error = %e, zone = %zone.name, master = %master, "Zone transfer failed");
                    last_error = Some(e);
                }
            }
        }

        Err(DomainError::ZoneSyncFailed(match last_error {
            Some(e) => format!("{}: every master failed, last error: {}", zone.name, e),
            None => format!("{}: no masters to transfer from", zone.name),
        }))
    }
}
