pub mod database;
pub mod errors;
pub mod handler;
pub mod logging;
pub mod remote;
pub mod resync;
pub mod root;
pub mod server;

pub use database::DatabaseConfig;
pub use errors::ConfigError;
pub use handler::{HandlerConfig, DEFAULT_POOL_ID};
pub use logging::LoggingConfig;
pub use remote::RemoteConfig;
pub use resync::ResyncConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
