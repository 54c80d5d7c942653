#![allow(dead_code)]
#![allow(unused_imports)]

pub mod builders;
pub mod mock_repositories;

pub use builders::*;
pub use mock_repositories::*;
