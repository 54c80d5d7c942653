use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use zoneward_infrastructure::dns::transport::tcp::{
    read_with_length_prefix, send_with_length_prefix,
};
use zoneward_infrastructure::dns::DnsRequestHandler;

pub async fn start_dns_server(
    socket_addr: SocketAddr,
    handler: Arc<DnsRequestHandler>,
    tcp_idle_timeout: Duration,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let udp_socket = Arc::new(create_udp_socket(domain, socket_addr)?);
    let tcp_listener = create_tcp_listener(domain, socket_addr)?;

    let mut join_set: JoinSet<()> = JoinSet::new();
    join_set.spawn(run_udp_loop(udp_socket, handler.clone(), shutdown.clone()));
    join_set.spawn(run_tcp_loop(tcp_listener, handler, tcp_idle_timeout, shutdown));

    info!(bind_address = %socket_addr, "DNS server ready (UDP + TCP)");

    while join_set.join_next().await.is_some() {}

    info!("DNS listeners stopped");
    Ok(())
}

async fn run_udp_loop(
    socket: Arc<UdpSocket>,
    handler: Arc<DnsRequestHandler>,
    shutdown: CancellationToken,
) {
    let mut recv_buf = [0u8; 4096];

    loop {
        let (n, from) = tokio::select! {
            _ = shutdown.cancelled() => break,
            result = socket.recv_from(&mut recv_buf) => match result {
                Ok(received) => received,
                Err(e) => {
                    warn!(error = %e, "UDP recv error");
                    continue;
                }
            },
        };

        let handler = handler.clone();
        let socket = socket.clone();
        let query: Arc<[u8]> = Arc::from(&recv_buf[..n]);
        tokio::spawn(async move {
            if let Some(response) = handler.handle_udp(&query, from).await {
                if let Err(e) = socket.send_to(&response, from).await {
                    debug!(client = %from, error = %e, "Failed to send UDP response");
                }
            }
        });
    }
}

async fn run_tcp_loop(
    listener: TcpListener,
    handler: Arc<DnsRequestHandler>,
    idle_timeout: Duration,
    shutdown: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    tokio::spawn(serve_tcp_connection(
                        stream,
                        peer,
                        handler.clone(),
                        idle_timeout,
                        shutdown.clone(),
                    ));
                }
                Err(e) => warn!(error = %e, "TCP accept error"),
            },
        }
    }
}

/// Serves length-prefixed requests on one connection until the peer closes
/// it, it stays idle past `idle_timeout`, or the server shuts down.
async fn serve_tcp_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    handler: Arc<DnsRequestHandler>,
    idle_timeout: Duration,
    shutdown: CancellationToken,
) {
    loop {
        let read = tokio::select! {
            _ = shutdown.cancelled() => break,
            read = tokio::time::timeout(idle_timeout, read_with_length_prefix(&mut stream)) => read,
        };

        let request = match read {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(e)) => {
                debug!(client = %peer, error = %e, "TCP connection closed");
                break;
            }
            Err(_) => {
                debug!(client = %peer, "TCP connection idle, closing");
                break;
            }
        };

        for reply in handler.handle_tcp(&request, peer).await {
            if let Err(e) = send_with_length_prefix(&mut stream, &reply).await {
                debug!(client = %peer, error = %e, "Failed to write TCP response");
                return;
            }
        }
    }
}

fn create_udp_socket(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

fn create_tcp_listener(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    Ok(TcpListener::from_std(std_listener)?)
}
