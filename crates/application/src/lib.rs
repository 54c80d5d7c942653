//! Zoneward application layer: collaborator ports, the authorization and
//! projection services, and the request responders built on them.
pub mod ports;
pub mod services;
pub mod use_cases;
