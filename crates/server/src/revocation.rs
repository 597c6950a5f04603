//! # Token Revocation List
//!
//! Redis-backed revocation of issued access tokens, keyed by the token's
//! `jti` claim. Entries expire with the token itself, so the set stays
//! bounded and works across server instances.

use chrono::{DateTime, Utc};
use error::Result;
use redis::{AsyncCommands, RedisResult};
use tracing::debug;

/// Minimum TTL applied when a token is already past its expiry.
const EXPIRED_TOKEN_GRACE_SECONDS: u64 = 300;

/// Revocation list service backed by Redis
#[derive(Clone, Debug)]
pub struct RevocationList {
    client: redis::Client,
}

impl RevocationList {
    #[must_use]
    pub fn new(client: redis::Client) -> Self {
        Self {
            client,
        }
    }

    /// Revoke a token by its `jti`, expiring the entry when the token
    /// naturally expires.
    ///
    /// # Errors
    ///
    /// Returns an error if the Redis operation fails
    pub async fn revoke(&self, jti: &str, expires_at: DateTime<Utc>) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let now = Utc::now();
        let ttl_seconds = if expires_at > now {
            (expires_at - now).num_seconds() as u64
        }
        else {
            EXPIRED_TOKEN_GRACE_SECONDS
        };

        let _: () = conn
            .set_ex(revocation_key(jti), "revoked", ttl_seconds)
            .await?;

        debug!(jti = %jti, ttl_seconds, "Token revoked");

        Ok(())
    }

    /// Check whether a token's `jti` has been revoked.
    ///
    /// # Errors
    ///
    /// Returns an error if the Redis operation fails; callers must treat
    /// that as "unknown" and fail closed.
    pub async fn is_revoked(&self, jti: &str) -> Result<bool> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let result: RedisResult<Option<String>> = conn.get(revocation_key(jti)).await;

        match result {
            Ok(Some(_)) => Ok(true),
            Ok(None) => Ok(false),
            Err(e) => {
                Err(error::AppError::internal(format!(
                    "Redis revocation check failed: {}",
                    e
                )))
            },
        }
    }
}

fn revocation_key(jti: &str) -> String { format!("revoked:jti:{}", jti) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revocation_key_format() {
        assert_eq!(revocation_key("abc123"), "revoked:jti:abc123");
    }

    #[test]
    fn test_revocation_list_is_cloneable() {
        let client = redis::Client::open("redis://127.0.0.1:6379").unwrap();
        let list = RevocationList::new(client);
        let _cloned = list.clone();
    }
}
