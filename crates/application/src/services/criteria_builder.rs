use std::sync::Arc;

use zoneward_domain::{DomainError, HandlerConfig, Request, TsigScope, ZoneCriterion};

/// Applies the TSIG authorization policy to zone lookups.
///
/// Unsigned requests read from the default pool (unless signing is
/// enforced), pool-scoped keys read from their pool and zone-scoped keys
/// read exactly one zone.
#[derive(Debug, Clone)]
pub struct CriteriaBuilder {
    default_pool_id: Arc<str>,
    enforce_tsig: bool,
}

impl CriteriaBuilder {
    pub fn new(config: HandlerConfig) -> Self {
        Self {
            default_pool_id: Arc::from(config.default_pool_id),
            enforce_tsig: config.query_enforce_tsig,
        }
    }

    pub fn zone_criterion(
        &self,
        request: &Request,
        base: ZoneCriterion,
    ) -> Result<ZoneCriterion, DomainError> {
        match &request.tsig_key {
            None if self.enforce_tsig => Err(DomainError::AuthorizationDenied(
                "request is not TSIG signed".to_string(),
            )),
            None => Ok(base.in_pool(Arc::clone(&self.default_pool_id))),
            Some(key) => match key.scope {
                TsigScope::Pool => Ok(base.in_pool(Arc::clone(&key.resource_id))),
                TsigScope::Zone => base.restrict_to_zone(Arc::clone(&key.resource_id)),
            },
        }
    }
}
