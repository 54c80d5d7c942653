use serde::{Deserialize, Serialize};

/// Timeouts for queries this server sends to zone masters.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Extra UDP attempts after the first SOA query times out.
    #[serde(default = "default_retries")]
    pub retries: u32,

    #[serde(default = "default_transfer_timeout_secs")]
    pub transfer_timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            retries: default_retries(),
            transfer_timeout_secs: default_transfer_timeout_secs(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    2000
}

fn default_retries() -> u32 {
    2
}

fn default_transfer_timeout_secs() -> u64 {
    60
}
