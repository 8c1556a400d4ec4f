//! HTTP client for the remote reporting API.

pub mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
