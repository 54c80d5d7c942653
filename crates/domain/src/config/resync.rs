use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResyncConfig {
    #[serde(default = "default_workers")]
    pub workers: usize,

    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before retry `n` is `n * retry_backoff_ms`.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Keep at most one queued (not yet started) resync per zone.
    #[serde(default = "default_true")]
    pub coalesce_pending: bool,
}

impl Default for ResyncConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            queue_capacity: default_queue_capacity(),
            max_attempts: default_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            coalesce_pending: true,
        }
    }
}

fn default_workers() -> usize {
    2
}

fn default_queue_capacity() -> usize {
    256
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

fn default_true() -> bool {
    true
}
