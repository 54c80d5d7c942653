//! Structured storage filters.
//!
//! Every field is optional; `None` means "do not filter on this". The named
//! constructors cover the lookups the responders perform.

use std::sync::Arc;

use crate::dns_record::RecordType;
use crate::errors::DomainError;
use crate::names::normalize_name;
use crate::recordset::RecordSet;
use crate::zone::{Zone, ZoneKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
    Is(RecordType),
    IsNot(RecordType),
}

impl TypeFilter {
    pub fn matches(&self, record_type: RecordType) -> bool {
        match self {
            TypeFilter::Is(t) => *t == record_type,
            TypeFilter::IsNot(t) => *t != record_type,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneCriterion {
    pub id: Option<Arc<str>>,
    pub pool_id: Option<Arc<str>>,
    pub name: Option<Arc<str>>,
    pub kind: Option<ZoneKind>,
    pub deleted: Option<bool>,
}

impl ZoneCriterion {
    pub fn by_name(name: &str) -> Self {
        Self {
            name: Some(Arc::from(normalize_name(name))),
            ..Self::default()
        }
    }

    pub fn by_id(id: impl Into<Arc<str>>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Live secondary zone with the given name, as NOTIFY looks it up.
    pub fn secondary_by_name(name: &str) -> Self {
        Self {
            name: Some(Arc::from(normalize_name(name))),
            kind: Some(ZoneKind::Secondary),
            deleted: Some(false),
            ..Self::default()
        }
    }

    pub fn in_pool(mut self, pool_id: impl Into<Arc<str>>) -> Self {
        self.pool_id = Some(pool_id.into());
        self
    }

    /// Pins the lookup to one zone id. A criterion already naming a
    /// different zone can only be narrowed to nothing, so that is denied.
    pub fn restrict_to_zone(mut self, zone_id: impl Into<Arc<str>>) -> Result<Self, DomainError> {
        let zone_id = zone_id.into();
        if let Some(existing) = &self.id {
            if existing.as_ref() != zone_id.as_ref() {
                return Err(DomainError::AuthorizationDenied(format!(
                    "key is scoped to zone {}, request targets zone {}",
                    zone_id, existing
                )));
            }
        }
        self.id = Some(zone_id);
        Ok(self)
    }

    pub fn matches(&self, zone: &Zone) -> bool {
        self.id.as_ref().map_or(true, |id| *id == zone.id)
            && self.pool_id.as_ref().map_or(true, |p| *p == zone.pool_id)
            && self.name.as_ref().map_or(true, |n| *n == zone.name)
            && self.kind.map_or(true, |k| k == zone.kind)
            && self.deleted.map_or(true, |d| d == zone.deleted)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSetCriterion {
    pub zone_id: Option<Arc<str>>,
    pub zone_pool_id: Option<Arc<str>>,
    pub name: Option<Arc<str>>,
    pub record_type: Option<TypeFilter>,
    pub zone_deleted: Option<bool>,
}

impl RecordSetCriterion {
    /// Record-set answering `name`/`record_type` in any live zone.
    pub fn for_question(name: &str, record_type: RecordType) -> Self {
        Self {
            name: Some(Arc::from(normalize_name(name))),
            record_type: Some(TypeFilter::Is(record_type)),
            zone_deleted: Some(false),
            ..Self::default()
        }
    }

    /// Narrows the search to the zones `zone` admits: its zone id and pool
    /// carry over, the rest of the zone filter does not.
    pub fn within(mut self, zone: &ZoneCriterion) -> Self {
        if let Some(id) = &zone.id {
            self.zone_id = Some(Arc::clone(id));
        }
        if let Some(pool_id) = &zone.pool_id {
            self.zone_pool_id = Some(Arc::clone(pool_id));
        }
        self
    }

    pub fn zone_records_of_type(zone_id: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            zone_id: Some(zone_id.into()),
            record_type: Some(TypeFilter::Is(record_type)),
            ..Self::default()
        }
    }

    pub fn zone_records_except(zone_id: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            zone_id: Some(zone_id.into()),
            record_type: Some(TypeFilter::IsNot(record_type)),
            ..Self::default()
        }
    }

    /// `zone` is the zone owning `recordset`.
    pub fn matches(&self, recordset: &RecordSet, zone: &Zone) -> bool {
        self.zone_id
            .as_ref()
            .map_or(true, |z| *z == recordset.zone_id)
            && self.zone_pool_id.as_ref().map_or(true, |p| *p == zone.pool_id)
            && self.name.as_ref().map_or(true, |n| *n == recordset.name)
            && self
                .record_type
                .map_or(true, |f| f.matches(recordset.record_type))
            && self.zone_deleted.map_or(true, |d| d == zone.deleted)
    }
}
