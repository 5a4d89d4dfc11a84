//! Test doubles for the cache tiers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use redis::{ErrorKind, RedisError};

use crate::cache::{CacheTier, LocalTier};
use crate::error::TierError;
use crate::models::{Category, Coordinates, PointOfInterest};

/// `n` places sorted by distance.
pub fn sample_places(n: u32) -> Vec<PointOfInterest> {
    (0..n)
        .map(|i| PointOfInterest {
            category: Category::School,
            name: format!("Place {}", i),
            address: format!("{} Main Road", i + 1),
            distance: 100 * (i + 1),
            duration: 60 * (i + 1),
            place_id: format!("place_{}", i),
            rating: Some(4.0),
            user_ratings_total: Some(10 + i),
            coordinates: Coordinates::new(19.0 + f64::from(i) * 0.001, 72.8),
        })
        .collect()
}

/// In-memory remote tier that can be switched off mid-test.
#[derive(Default)]
pub struct FlakyTier {
    inner: LocalTier,
    down: AtomicBool,
}

impl FlakyTier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn go_down(&self) {
        self.down.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), TierError> {
        if self.down.load(Ordering::SeqCst) {
            Err(TierError::Redis(RedisError::from((
                ErrorKind::IoError,
                "connection refused",
            ))))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CacheTier for FlakyTier {
    fn name(&self) -> &'static str {
        "flaky"
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<PointOfInterest>>, TierError> {
        self.check()?;
        Ok(self.inner.get(key).await)
    }

    async fn set(
        &self,
        key: &str,
        places: &[PointOfInterest],
        ttl_seconds: u64,
    ) -> Result<(), TierError> {
        self.check()?;
        self.inner.insert(key.to_string(), places.to_vec(), ttl_seconds).await;
        Ok(())
    }

    async fn remove_prefix(&self, prefix: &str) -> Result<usize, TierError> {
        self.check()?;
        Ok(self.inner.remove_prefix(prefix).await)
    }
}

/// Remote tier whose every call hangs for `delay`.
pub struct SlowTier {
    delay: Duration,
}

impl SlowTier {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl CacheTier for SlowTier {
    fn name(&self) -> &'static str {
        "slow"
    }

    async fn get(&self, _key: &str) -> Result<Option<Vec<PointOfInterest>>, TierError> {
        tokio::time::sleep(self.delay).await;
        Ok(None)
    }

    async fn set(
        &self,
        _key: &str,
        _places: &[PointOfInterest],
        _ttl_seconds: u64,
    ) -> Result<(), TierError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }

    async fn remove_prefix(&self, _prefix: &str) -> Result<usize, TierError> {
        tokio::time::sleep(self.delay).await;
        Ok(0)
    }
}
