use async_trait::async_trait;
use zoneward_domain::{
    DomainError, RecordSet, RecordSetCriterion, RequestContext, Zone, ZoneCriterion,
};

/// Read access to stored zones and record-sets.
#[async_trait]
pub trait ZoneRepository: Send + Sync {
    /// Exactly one zone matching `criterion`, or `ZoneNotFound`.
    async fn find_zone(
        &self,
        context: &RequestContext,
        criterion: &ZoneCriterion,
    ) -> Result<Zone, DomainError>;

    /// Exactly one record-set matching `criterion`, or `RecordSetNotFound`.
    async fn find_recordset(
        &self,
        context: &RequestContext,
        criterion: &RecordSetCriterion,
    ) -> Result<RecordSet, DomainError>;

    /// Every matching record-set in a stable order (name, type, insertion).
    async fn find_recordsets(
        &self,
        context: &RequestContext,
        criterion: &RecordSetCriterion,
    ) -> Result<Vec<RecordSet>, DomainError>;
}
