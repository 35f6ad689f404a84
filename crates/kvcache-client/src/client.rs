//! # Cache Client
//!
//! Pass-through client for a Redis-compatible key-value server.

use std::sync::Arc;
use std::time::Duration;

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

/// Connection slot shared by all clones of a client.
enum ConnState {
    /// No connection attempted yet
    Idle,
    /// Live managed connection
    Ready(ConnectionManager),
    /// Closed; operations fail fast
    Closed,
}

impl std::fmt::Debug for ConnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::Ready(_) => f.write_str("Ready"),
            Self::Closed => f.write_str("Closed"),
        }
    }
}

/// Cache client with a managed connection lifecycle.
///
/// Cloning is cheap: all clones share one underlying connection, which is
/// established lazily on first use and released for everyone by
/// [`CacheClient::close`]. Values are opaque strings; concurrency safety and
/// timeout policy are inherited from the driver's [`ConnectionManager`].
#[derive(Clone, Debug)]
pub struct CacheClient {
    client: Client,
    conn: Arc<RwLock<ConnState>>,
}

impl CacheClient {
    /// Create a new cache client.
    ///
    /// Parses the connection URL eagerly but performs no network round-trip;
    /// connectivity is verified on first use (see [`CacheClient::ping`]).
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] when the configured address or
    /// credential does not form a valid connection URL.
    pub fn new(config: &CacheConfig) -> Result<Self> {
        let client = Client::open(config.connection_url()).map_err(CacheError::Connection)?;

        Ok(Self {
            client,
            conn: Arc::new(RwLock::new(ConnState::Idle)),
        })
    }

    /// Get the shared connection, establishing it on first use.
    async fn connection(&self) -> Result<ConnectionManager> {
        {
            let state = self.conn.read().await;
            match &*state {
                ConnState::Ready(conn) => return Ok(conn.clone()),
                ConnState::Closed => return Err(CacheError::Closed),
                ConnState::Idle => {}
            }
        }

        let mut state = self.conn.write().await;
        match &mut *state {
            ConnState::Ready(conn) => Ok(conn.clone()),
            ConnState::Closed => Err(CacheError::Closed),
            ConnState::Idle => {
                debug!("establishing cache server connection");
                let conn = ConnectionManager::new(self.client.clone())
                    .await
                    .map_err(CacheError::Connection)?;
                *state = ConnState::Ready(conn.clone());
                Ok(conn)
            }
        }
    }

    /// Send a liveness probe to the server.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] when the server is unreachable,
    /// authentication fails, or the probe itself fails.
    pub async fn ping(&self) -> Result<String> {
        let mut conn = self.connection().await?;

        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(CacheError::Connection)?;

        info!(response = %pong, "connected to cache server");
        Ok(pong)
    }

    /// Store a string value under a key, replacing any existing value.
    ///
    /// A zero `ttl` stores the value without expiration. Sub-second TTLs
    /// round up to one second (SETEX granularity).
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Write`] when the server rejects the write.
    pub async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.connection().await?;

        let result: redis::RedisResult<()> = if ttl.is_zero() {
            conn.set(key, value).await
        } else {
            conn.set_ex(key, value, ttl.as_secs().max(1)).await
        };

        result.map_err(|source| CacheError::Write {
            key: key.to_string(),
            source,
        })
    }

    /// Fetch the string value stored under a key.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotFound`] when the key does not exist and
    /// [`CacheError::Read`] for transport or server failures.
    pub async fn get(&self, key: &str) -> Result<String> {
        let mut conn = self.connection().await?;

        let value: Option<String> = conn.get(key).await.map_err(|source| CacheError::Read {
            key: key.to_string(),
            source,
        })?;

        value.ok_or_else(|| CacheError::NotFound(key.to_string()))
    }

    /// Invalidate a key by deleting it.
    ///
    /// Deleting an absent key is not an error; the return value reports
    /// whether a key was actually removed.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Write`] when the server rejects the delete.
    pub async fn invalidate(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;

        let deleted: i64 = conn.del(key).await.map_err(|source| CacheError::Write {
            key: key.to_string(),
            source,
        })?;

        Ok(deleted > 0)
    }

    /// Close the underlying connection for this client and all its clones.
    ///
    /// A live connection is told to quit server-side before the handle is
    /// dropped; the slot is marked closed regardless, so every subsequent
    /// operation fails with [`CacheError::Closed`]. Closing an already closed
    /// client is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Shutdown`] when the server-side quit fails.
    pub async fn close(&self) -> Result<()> {
        let mut state = self.conn.write().await;

        match std::mem::replace(&mut *state, ConnState::Closed) {
            ConnState::Ready(mut conn) => {
                redis::cmd("QUIT")
                    .query_async::<()>(&mut conn)
                    .await
                    .map_err(CacheError::Shutdown)?;
                debug!("cache connection closed");
                Ok(())
            }
            ConnState::Idle => Ok(()),
            ConnState::Closed => {
                debug!("cache client already closed");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    fn local_client() -> CacheClient {
        CacheClient::new(&CacheConfig::default()).unwrap()
    }

    #[test]
    fn test_rejects_malformed_address() {
        let config = CacheConfig {
            addr: "not an address".to_string(),
            ..CacheConfig::default()
        };

        let err = CacheClient::new(&config).unwrap_err();
        assert!(matches!(err, CacheError::Connection(_)));
    }

    #[tokio::test]
    async fn test_operations_fail_after_close() {
        let client = local_client();
        assert_ok!(client.close().await);

        assert!(matches!(client.ping().await, Err(CacheError::Closed)));
        assert!(matches!(client.get("k").await, Err(CacheError::Closed)));
        assert!(matches!(
            client.set("k", "v", Duration::ZERO).await,
            Err(CacheError::Closed)
        ));
        assert!(matches!(client.invalidate("k").await, Err(CacheError::Closed)));
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let client = local_client();
        assert_ok!(client.close().await);
        assert_ok!(client.close().await); // second close is a no-op
    }

    #[tokio::test]
    async fn test_close_applies_to_clones() {
        let client = local_client();
        let clone = client.clone();
        assert_ok!(client.close().await);

        assert!(matches!(clone.get("k").await, Err(CacheError::Closed)));
    }
}
