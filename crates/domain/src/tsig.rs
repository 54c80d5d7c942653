use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TsigScope {
    Pool,
    Zone,
}

impl TsigScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            TsigScope::Pool => "POOL",
            TsigScope::Zone => "ZONE",
        }
    }
}

impl fmt::Display for TsigScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TsigScope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "POOL" => Ok(TsigScope::Pool),
            "ZONE" => Ok(TsigScope::Zone),
            _ => Err(DomainError::UnsupportedAuthorizationScope(s.to_string())),
        }
    }
}

/// A TSIG key that has already been verified by the transport.
///
/// `resource_id` names the pool or the zone the key is allowed to read,
/// depending on `scope`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsigKey {
    pub name: Arc<str>,
    pub scope: TsigScope,
    pub resource_id: Arc<str>,
}

impl TsigKey {
    pub fn new(
        name: impl Into<Arc<str>>,
        scope: TsigScope,
        resource_id: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            name: name.into(),
            scope,
            resource_id: resource_id.into(),
        }
    }

    pub fn pool(name: impl Into<Arc<str>>, pool_id: impl Into<Arc<str>>) -> Self {
        Self::new(name, TsigScope::Pool, pool_id)
    }

    pub fn zone(name: impl Into<Arc<str>>, zone_id: impl Into<Arc<str>>) -> Self {
        Self::new(name, TsigScope::Zone, zone_id)
    }
}
