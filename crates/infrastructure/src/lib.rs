//! Adapters for the zoneward ports: hickory-proto wire codec and transports,
//! the remote SOA query and AXFR client, and the SQLite zone store.
pub mod database;
pub mod dns;
pub mod repositories;
