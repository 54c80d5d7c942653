#![allow(dead_code)]

pub mod db;
pub mod handler;
pub mod mock_master;

pub use db::*;
pub use handler::*;
pub use mock_master::*;
