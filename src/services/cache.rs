use crate::models::Profile;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const PROFILE_PREFIX: &str = "profile:";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Cached profile is unreadable: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Profile cache in front of the store.
///
/// L1 is an in-process moka cache of decoded profiles, L2 is Redis shared
/// across instances and holds the JSON row. Candidate pools never go
/// through here.
pub struct ProfileCache {
    redis: ConnectionManager,
    local: moka::future::Cache<String, Profile>,
    ttl_secs: u64,
}

impl ProfileCache {
    pub async fn connect(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        let local = moka::future::Cache::builder()
            .max_capacity(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Ok(Self {
            redis,
            local,
            ttl_secs,
        })
    }

    /// Cached profile of `user_id`; `None` on a miss in both tiers
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, CacheError> {
        let key = profile_key(user_id);

        if let Some(profile) = self.local.get(&key).await {
            return Ok(Some(profile));
        }

        let mut conn = self.redis.clone();
        let Some(json) = conn.get::<_, Option<String>>(&key).await? else {
            return Ok(None);
        };

        let profile = decode_profile(&json)?;
        self.local.insert(key, profile.clone()).await;
        tracing::trace!("Profile {} promoted from Redis", user_id);

        Ok(Some(profile))
    }

    pub async fn put_profile(&self, profile: &Profile) -> Result<(), CacheError> {
        let key = profile_key(&profile.user_id);
        let json = serde_json::to_string(profile)?;

        self.local.insert(key.clone(), profile.clone()).await;

        let mut conn = self.redis.clone();
        conn.set_ex::<_, _, ()>(&key, json, self.ttl_secs).await?;
        Ok(())
    }

    /// Drop `user_id` from both tiers after a write to their row
    pub async fn invalidate_profile(&self, user_id: &str) -> Result<(), CacheError> {
        let key = profile_key(user_id);
        self.local.invalidate(&key).await;

        let mut conn = self.redis.clone();
        conn.del::<_, ()>(&key).await?;
        Ok(())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            l1_size: self.local.entry_count(),
            ttl_secs: self.ttl_secs,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub l1_size: u64,
    pub ttl_secs: u64,
}

fn profile_key(user_id: &str) -> String {
    format!("{}{}", PROFILE_PREFIX, user_id)
}

fn decode_profile(json: &str) -> Result<Profile, CacheError> {
    Ok(serde_json::from_str(json)?)
}
