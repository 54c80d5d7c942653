use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use zoneward_domain::CliOverrides;
use zoneward_infrastructure::dns::DnsRequestHandler;
use zoneward_jobs::{JobRunner, ZoneResyncJob};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "zoneward")]
#[command(version)]
#[command(about = "Zoneward - authoritative mini-DNS for zone transfers, queries and NOTIFY")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// DNS port (UDP and TCP)
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Database path
    #[arg(long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Refuse QUERY and AXFR requests without a TSIG key
    #[arg(long)]
    enforce_tsig: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        bind_address: cli.bind.clone(),
        port: cli.port,
        database_path: cli.database.clone(),
        log_level: cli.log_level.clone(),
        enforce_tsig: cli.enforce_tsig.then_some(true),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Zoneward v{}", env!("CARGO_PKG_VERSION"));

    let pool = bootstrap::init_database(&config.database).await?;

    let repos = di::Repositories::new(pool);
    let dns_services = di::DnsServices::new(&config);
    let use_cases = di::UseCases::new(&config, &repos, &dns_services);

    let shutdown = CancellationToken::new();

    let resync_job = ZoneResyncJob::new(use_cases.sync_zone.clone(), dns_services.resync_receiver)
        .with_workers(config.resync.workers)
        .with_retry(
            config.resync.max_attempts,
            Duration::from_millis(config.resync.retry_backoff_ms),
        );

    JobRunner::new()
        .with_zone_resync(resync_job)
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    let dns_addr: SocketAddr =
        format!("{}:{}", config.server.bind_address, config.server.port).parse()?;
    let handler = Arc::new(DnsRequestHandler::new(
        use_cases.dispatcher.clone(),
        config.server.tcp_max_message_size,
    ));

    let server_shutdown = shutdown.clone();
    let idle_timeout = Duration::from_secs(config.server.tcp_idle_timeout_secs);
    let server = tokio::spawn(async move {
        if let Err(e) = server::start_dns_server(dns_addr, handler, idle_timeout, server_shutdown).await {
            error!(error = %e, "DNS server error");
        }
    });

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");
    shutdown.cancel();

    if let Err(e) = server.await {
        error!(error = %e, "DNS server task failed");
    }

    info!("Server shutdown complete");
    Ok(())
}
