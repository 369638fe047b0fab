pub mod config;
pub mod constants;
pub mod error;
pub mod observability;
pub mod processing;
pub mod server;
pub mod types;
