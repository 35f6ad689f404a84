//! # KV Cache Client
//!
//! Thin client layer over a Redis-compatible key-value server: a managed
//! connection lifecycle plus string pass-through operations (ping, set, get,
//! invalidate, close). No caching policy, no retries, no data transformation;
//! pooling and timeouts are whatever the driver's connection manager
//! provides.
//!
//! The client connects lazily on first use, shares one connection across
//! clones, and is closed exactly once by the owning process at its shutdown
//! phase (see [`shutdown::shutdown_signal`]).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kvcache_client::{CacheClient, CacheConfig, shutdown_signal};
//!
//! let client = CacheClient::new(&CacheConfig::from_env())?;
//! client.ping().await?;
//!
//! client.set("greeting", "hello", std::time::Duration::ZERO).await?;
//! let value = client.get("greeting").await?;
//!
//! shutdown_signal().await;
//! client.close().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod shutdown;

// Re-export commonly used types
pub use client::CacheClient;
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use shutdown::shutdown_signal;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
