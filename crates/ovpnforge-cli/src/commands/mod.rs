//! Command implementations.

pub mod build_ca;
pub mod build_client_cert;
pub mod build_server_cert;
pub mod client_config;
pub mod server_config;
pub mod static_key;
