use serde::{Deserialize, Serialize};

pub const DEFAULT_POOL_ID: &str = "794ccc2c-d751-44fe-b57f-8894c9f5c842";

/// Authorization policy of the request handler.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HandlerConfig {
    /// Pool whose zones unsigned requests may read.
    #[serde(default = "default_pool_id")]
    pub default_pool_id: String,

    /// Refuse QUERY and AXFR requests that carry no TSIG key.
    #[serde(default)]
    pub query_enforce_tsig: bool,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            default_pool_id: default_pool_id(),
            query_enforce_tsig: false,
        }
    }
}

fn default_pool_id() -> String {
    DEFAULT_POOL_ID.to_string()
}
