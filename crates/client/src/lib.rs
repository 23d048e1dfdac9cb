//! HTTP client for the lab inventory API.
//!
//! Commands are validated locally before anything is sent; server rejections
//! surface as [`ClientError::Api`] carrying the server's `detail` message.

pub mod client;
pub mod config;
pub mod error;

pub use client::{BatchRow, InventoryClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
