// voltra-api: Async Rust client for the Voltra energy-management REST API

pub mod address;
pub mod auth;
pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use error::Error;
pub use transport::TransportConfig;
