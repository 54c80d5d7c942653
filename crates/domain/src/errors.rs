use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Zone not found: {0}")]
    ZoneNotFound(String),

    #[error("Record set not found: {0}")]
    RecordSetNotFound(String),

    #[error("Authorization denied: {0}")]
    AuthorizationDenied(String),

    #[error("Unsupported TSIG key scope: {0}")]
    UnsupportedAuthorizationScope(String),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid record data: {0}")]
    InvalidRecordData(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("DNS codec error: {0}")]
    Codec(String),

    #[error("Remote query failed: {0}")]
    RemoteQuery(String),

    #[error("Transport timeout after {0}ms")]
    TransportTimeout(u64),

    #[error("Zone transfer failed: {0}")]
    ZoneTransferFailed(String),

    #[error("Zone sync failed: {0}")]
    ZoneSyncFailed(String),

    #[error("Resync scheduler unavailable: {0}")]
    SchedulerUnavailable(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// Errors a responder answers with REFUSED instead of SERVFAIL.
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            DomainError::ZoneNotFound(_)
                | DomainError::RecordSetNotFound(_)
                | DomainError::AuthorizationDenied(_)
                | DomainError::UnsupportedAuthorizationScope(_)
                | DomainError::MalformedRequest(_)
        )
    }
}
