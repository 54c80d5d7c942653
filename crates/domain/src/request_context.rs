use std::fmt;
use std::sync::Arc;

/// Per-request context handed to every collaborator call, used to correlate logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: Arc<str>,
}

impl RequestContext {
    pub fn new(request_id: impl Into<Arc<str>>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    /// Context for work that did not originate from a DNS message.
    pub fn background(task: &str) -> Self {
        Self::new(format!("bg-{}", task))
    }
}

impl fmt::Display for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.request_id)
    }
}
