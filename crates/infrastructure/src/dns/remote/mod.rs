mod axfr_client;
mod soa_query;

pub use axfr_client::AxfrZoneTransferClient;
pub use soa_query::UdpSoaQuery;
