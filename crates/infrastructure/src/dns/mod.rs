pub mod remote;
pub mod server;
pub mod transport;
pub mod wire;

pub use remote::{AxfrZoneTransferClient, UdpSoaQuery};
pub use server::DnsRequestHandler;
pub use wire::WireCodec;
