pub mod domain;
pub mod endpoint;
pub mod error;
