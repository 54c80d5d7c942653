use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Seconds an idle TCP connection is kept open between messages.
    #[serde(default = "default_tcp_idle_timeout_secs")]
    pub tcp_idle_timeout_secs: u64,

    /// Upper bound on the encoded size of one TCP response message; larger
    /// answers (zone transfers) are split across several messages.
    #[serde(default = "default_tcp_max_message_size")]
    pub tcp_max_message_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            tcp_idle_timeout_secs: default_tcp_idle_timeout_secs(),
            tcp_max_message_size: default_tcp_max_message_size(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5354
}

fn default_tcp_idle_timeout_secs() -> u64 {
    30
}

fn default_tcp_max_message_size() -> usize {
    16 * 1024
}
