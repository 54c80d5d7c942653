use std::sync::Arc;

use zoneward_domain::{RecordSet, ResourceRecordSet, Zone};

/// Turns stored record-sets into answer record-sets.
pub struct RRsetProjector;

impl RRsetProjector {
    /// Records pending deletion are dropped; a set left without records
    /// projects to `None`. A missing TTL falls back to the zone TTL.
    pub fn project(zone: &Zone, recordset: &RecordSet) -> Option<ResourceRecordSet> {
        let ttl = recordset.ttl.unwrap_or(zone.ttl);

        let data: Vec<Arc<str>> = recordset
            .records
            .iter()
            .filter(|record| !record.is_pending_delete())
            .map(|record| Arc::clone(&record.data))
            .collect();

        if data.is_empty() {
            return None;
        }

        Some(ResourceRecordSet::new(
            Arc::clone(&recordset.name),
            recordset.record_type,
            ttl,
            data,
        ))
    }
}
