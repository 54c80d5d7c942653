use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

use crate::errors::DomainError;
use crate::names::normalize_name;

pub const DEFAULT_DNS_PORT: u16 = 53;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneKind {
    Primary,
    Secondary,
}

impl ZoneKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneKind::Primary => "PRIMARY",
            ZoneKind::Secondary => "SECONDARY",
        }
    }
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ZoneKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PRIMARY" => Ok(ZoneKind::Primary),
            "SECONDARY" => Ok(ZoneKind::Secondary),
            _ => Err(DomainError::InvalidRecordData(format!(
                "Unknown zone type: {}",
                s
            ))),
        }
    }
}

/// A primary server a secondary zone pulls from and accepts NOTIFY from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneMaster {
    pub host: IpAddr,
    pub port: u16,
}

impl ZoneMaster {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self { host, port }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl fmt::Display for ZoneMaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.socket_addr())
    }
}

impl FromStr for ZoneMaster {
    type Err = DomainError;

    /// Accepts `host`, `host:port` and `[v6]:port`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(addr) = s.parse::<SocketAddr>() {
            return Ok(Self::new(addr.ip(), addr.port()));
        }
        s.parse::<IpAddr>()
            .map(|ip| Self::new(ip, DEFAULT_DNS_PORT))
            .map_err(|_| DomainError::InvalidRecordData(format!("Invalid master address: {}", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub id: Arc<str>,
    pub pool_id: Arc<str>,
    pub name: Arc<str>,
    pub serial: u32,
    pub ttl: u32,
    pub kind: ZoneKind,
    pub masters: Vec<ZoneMaster>,
    pub deleted: bool,
}

impl Zone {
    pub fn new(
        id: impl Into<Arc<str>>,
        pool_id: impl Into<Arc<str>>,
        name: &str,
        serial: u32,
        ttl: u32,
    ) -> Self {
        Self {
            id: id.into(),
            pool_id: pool_id.into(),
            name: Arc::from(normalize_name(name)),
            serial,
            ttl,
            kind: ZoneKind::Primary,
            masters: Vec::new(),
            deleted: false,
        }
    }

    pub fn secondary(mut self, masters: Vec<ZoneMaster>) -> Self {
        self.kind = ZoneKind::Secondary;
        self.masters = masters;
        self
    }

    pub fn is_secondary(&self) -> bool {
        self.kind == ZoneKind::Secondary
    }

    /// The registered master whose host is `ip`, if any. Ports are not
    /// compared: NOTIFY usually arrives from an ephemeral source port.
    pub fn master_for(&self, ip: IpAddr) -> Option<ZoneMaster> {
        let ip = ip.to_canonical();
        self.masters
            .iter()
            .copied()
            .find(|m| m.host.to_canonical() == ip)
    }
}
