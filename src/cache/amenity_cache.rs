//! Amenity Cache Module
//!
//! Coordinates the local and remote tiers. The remote tier is untrusted:
//! every remote call is bounded by a timeout and any failure degrades that
//! one operation to a miss or a no-op.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cache::key::{namespace_pattern, CacheKey, Radius, SubjectId, KEY_NAMESPACE};
use crate::cache::{CacheCounters, CacheStats, CacheTier, LocalTier, RedisTier};
use crate::config::Config;
use crate::error::TierError;
use crate::models::{Category, PointOfInterest};

// == Amenity Cache ==
/// Two-tier read-through cache of ranked nearby places.
///
/// One instance is built at startup and shared via `Arc`.
pub struct AmenityCache {
    local: LocalTier,
    remote: Option<Arc<dyn CacheTier>>,
    default_ttl: u64,
    remote_timeout: Duration,
    counters: CacheCounters,
}

impl AmenityCache {
    // == Constructor ==
    /// Creates a cache over explicit tiers.
    ///
    /// # Arguments
    /// * `remote` - Shared tier, or None to run local-only
    /// * `default_ttl` - TTL in seconds used when `set` is given none
    /// * `remote_timeout` - Upper bound on each remote call
    pub fn new(
        local: LocalTier,
        remote: Option<Arc<dyn CacheTier>>,
        default_ttl: u64,
        remote_timeout: Duration,
    ) -> Self {
        Self {
            local,
            remote,
            default_ttl,
            remote_timeout,
            counters: CacheCounters::new(),
        }
    }

    /// Local-only cache, used when Redis is disabled and in tests.
    pub fn local_only(default_ttl: u64) -> Self {
        Self::new(LocalTier::new(), None, default_ttl, Duration::from_secs(2))
    }

    // == Connect ==
    /// Builds the cache from configuration, connecting to Redis if enabled.
    ///
    /// Never fails: an unreachable Redis leaves the cache local-only for the
    /// life of the process.
    pub async fn connect(config: &Config) -> Self {
        let remote: Option<Arc<dyn CacheTier>> = if !config.redis.enabled {
            info!("Redis disabled in configuration, using in-memory cache only");
            None
        } else {
            match RedisTier::connect(&config.redis).await {
                Ok(tier) => Some(Arc::new(tier)),
                Err(e) => {
                    warn!("Redis unavailable ({}), using in-memory cache only", e);
                    None
                }
            }
        };

        Self::new(
            LocalTier::new(),
            remote,
            config.amenity_ttl,
            config.redis.timeout,
        )
    }

    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    /// Local tier handle, shared with the sweep task.
    pub fn local(&self) -> &LocalTier {
        &self.local
    }

    // == Remote Call ==
    /// Runs one remote operation under the timeout, logging any failure.
    ///
    /// Returns None when there is no remote tier or the call failed.
    async fn remote_call<'a, T, F, Fut>(&'a self, op: &str, f: F) -> Option<T>
    where
        F: FnOnce(&'a dyn CacheTier) -> Fut,
        Fut: Future<Output = Result<T, TierError>> + 'a,
    {
        let remote = self.remote.as_deref()?;
        let result = match tokio::time::timeout(self.remote_timeout, f(remote)).await {
            Ok(result) => result,
            Err(_) => Err(TierError::Timeout(self.remote_timeout)),
        };

        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.counters.record_remote_error();
                warn!("{} {} error: {}", remote.name(), op, e);
                None
            }
        }
    }

    // == Get ==
    /// Looks up the places cached for `(subject, category, radius)`.
    ///
    /// The remote tier is tried first; a remote hit is returned without
    /// being copied into the local tier.
    pub async fn get(
        &self,
        subject: &SubjectId,
        category: Category,
        radius: Radius,
    ) -> Option<Vec<PointOfInterest>> {
        let key = CacheKey::new(subject.clone(), category, radius).storage_key();

        if let Some(Some(places)) = self.remote_call("get", |r| r.get(&key)).await {
            self.counters.record_remote_hit();
            debug!("Cache HIT (remote) for key: {}", key);
            return Some(places);
        }

        match self.local.get(&key).await {
            Some(places) => {
                self.counters.record_local_hit();
                debug!("Cache HIT (local) for key: {}", key);
                Some(places)
            }
            None => {
                self.counters.record_miss();
                debug!("Cache MISS for key: {}", key);
                None
            }
        }
    }

    // == Set ==
    /// Stores places for `(subject, category, radius)` in both tiers.
    ///
    /// # Arguments
    /// * `ttl_seconds` - TTL for this entry; None or 0 uses the default TTL
    pub async fn set(
        &self,
        subject: &SubjectId,
        category: Category,
        places: Vec<PointOfInterest>,
        ttl_seconds: Option<u64>,
        radius: Radius,
    ) {
        let key = CacheKey::new(subject.clone(), category, radius).storage_key();
        let ttl = match ttl_seconds {
            Some(ttl) if ttl > 0 => ttl,
            _ => self.default_ttl,
        };

        self.remote_call("set", |r| r.set(&key, &places, ttl)).await;

        debug!("Cache SET for key: {} (TTL: {}s)", key, ttl);
        self.local.insert(key, places, ttl).await;
    }

    // == Invalidate ==
    /// Drops every entry for `subject`, whatever its category or radius.
    pub async fn invalidate(&self, subject: &SubjectId) {
        let prefix = subject.key_prefix();

        self.remote_call("invalidate", |r| r.remove_prefix(&prefix))
            .await;

        let removed = self.local.remove_prefix(&prefix).await;
        debug!("Invalidated {} local entries for subject {}", removed, subject);
    }

    // == Clear ==
    /// Drops every entry in this cache's namespace from both tiers.
    ///
    /// Unrelated keys on a shared Redis are left alone.
    pub async fn clear(&self) {
        let prefix = format!("{}:", KEY_NAMESPACE);

        if let Some(removed) = self
            .remote_call("clear", |r| r.remove_prefix(&prefix))
            .await
        {
            info!("Cleared {} remote entries matching {}", removed, namespace_pattern());
        }

        let removed = self.local.clear().await;
        info!("Cache cleared: {} local entries removed", removed);
    }

    // == Stats ==
    pub async fn stats(&self) -> CacheStats {
        self.counters
            .snapshot(self.remote.is_some(), self.local.len().await)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::test_support::{sample_places, FlakyTier, SlowTier};

    const TTL: u64 = 300;

    fn subject(id: &str) -> SubjectId {
        SubjectId::new(id).unwrap()
    }

    fn radius(m: u32) -> Radius {
        Radius::new(m).unwrap()
    }

    fn with_remote(remote: Arc<dyn CacheTier>) -> AmenityCache {
        AmenityCache::new(LocalTier::new(), Some(remote), TTL, Duration::from_millis(100))
    }

    #[tokio::test]
    async fn test_set_then_get_local_only() {
        let cache = AmenityCache::local_only(TTL);
        let s = subject("1");

        cache.set(&s, Category::School, sample_places(3), None, Radius::default()).await;

        let got = cache.get(&s, Category::School, Radius::default()).await;
        assert_eq!(got, Some(sample_places(3)));
    }

    #[tokio::test]
    async fn test_set_then_get_with_remote() {
        let remote = Arc::new(LocalTier::new());
        let cache = with_remote(remote.clone());
        let s = subject("1");

        cache.set(&s, Category::Park, sample_places(2), Some(60), radius(1000)).await;

        assert!(remote.get("amenity:1:park:1000").await.is_some());
        assert_eq!(
            cache.get(&s, Category::Park, radius(1000)).await,
            Some(sample_places(2))
        );
        assert_eq!(cache.stats().await.remote_hits, 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let cache = AmenityCache::local_only(TTL);
        assert!(cache.get(&subject("1"), Category::Bank, Radius::default()).await.is_none());
        assert_eq!(cache.stats().await.misses, 1);
    }

    #[tokio::test]
    async fn test_remote_hit_not_written_back_locally() {
        let remote = Arc::new(LocalTier::new());
        remote
            .insert("amenity:7:gym:5000".to_string(), sample_places(1), 60)
            .await;
        let cache = with_remote(remote);

        let got = cache.get(&subject("7"), Category::Gym, Radius::default()).await;

        assert_eq!(got, Some(sample_places(1)));
        assert_eq!(cache.stats().await.local_entry_count, 0);
    }

    #[tokio::test]
    async fn test_remote_failure_after_set_served_locally() {
        let remote = Arc::new(FlakyTier::new());
        let cache = with_remote(remote.clone());
        let s = subject("3");

        cache.set(&s, Category::Hospital, sample_places(2), None, Radius::default()).await;
        remote.go_down();

        let got = cache.get(&s, Category::Hospital, Radius::default()).await;

        assert_eq!(got, Some(sample_places(2)));
        let stats = cache.stats().await;
        assert_eq!(stats.remote_errors, 1);
        assert_eq!(stats.local_hits, 1);
    }

    #[tokio::test]
    async fn test_remote_down_for_every_operation() {
        let remote = Arc::new(FlakyTier::new());
        remote.go_down();
        let cache = with_remote(remote);
        let s = subject("4");

        cache.set(&s, Category::Bank, sample_places(1), None, Radius::default()).await;
        assert!(cache.get(&s, Category::Bank, Radius::default()).await.is_some());
        cache.invalidate(&s).await;
        assert!(cache.get(&s, Category::Bank, Radius::default()).await.is_none());
        cache.clear().await;

        assert_eq!(cache.stats().await.remote_errors, 5);
    }

    #[tokio::test]
    async fn test_slow_remote_is_bounded() {
        let cache = with_remote(Arc::new(SlowTier::new(Duration::from_secs(30))));
        let s = subject("5");

        let started = std::time::Instant::now();
        cache.set(&s, Category::Pharmacy, sample_places(1), None, Radius::default()).await;
        let got = cache.get(&s, Category::Pharmacy, Radius::default()).await;

        assert_eq!(got, Some(sample_places(1)));
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(cache.stats().await.remote_errors, 2);
    }

    #[tokio::test]
    async fn test_key_isolation_by_radius_and_category() {
        let cache = AmenityCache::local_only(TTL);
        let s = subject("A");

        cache.set(&s, Category::School, sample_places(1), None, radius(1000)).await;
        cache.set(&s, Category::School, sample_places(2), None, radius(2000)).await;
        cache.set(&s, Category::Gym, sample_places(3), None, radius(1000)).await;

        assert_eq!(cache.get(&s, Category::School, radius(1000)).await.unwrap().len(), 1);
        assert_eq!(cache.get(&s, Category::School, radius(2000)).await.unwrap().len(), 2);
        assert_eq!(cache.get(&s, Category::Gym, radius(1000)).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_invalidate_scope() {
        let remote = Arc::new(LocalTier::new());
        let cache = with_remote(remote.clone());
        let (a, b) = (subject("A"), subject("B"));

        cache.set(&a, Category::Park, sample_places(1), None, radius(500)).await;
        cache.set(&a, Category::Bank, sample_places(1), None, radius(900)).await;
        cache.set(&b, Category::Park, sample_places(2), None, radius(500)).await;

        cache.invalidate(&a).await;

        assert!(cache.get(&a, Category::Park, radius(500)).await.is_none());
        assert!(cache.get(&a, Category::Bank, radius(900)).await.is_none());
        assert_eq!(cache.get(&b, Category::Park, radius(500)).await, Some(sample_places(2)));
        assert_eq!(remote.len().await, 1);
    }

    #[tokio::test]
    async fn test_clear_scoped_to_namespace() {
        let remote = Arc::new(LocalTier::new());
        remote.insert("session:xyz".to_string(), sample_places(1), 60).await;
        let cache = with_remote(remote.clone());

        cache.set(&subject("1"), Category::Gym, sample_places(1), None, Radius::default()).await;
        cache.set(&subject("2"), Category::Gym, sample_places(1), None, Radius::default()).await;

        cache.clear().await;

        assert_eq!(cache.stats().await.local_entry_count, 0);
        assert!(remote.get("session:xyz").await.is_some());
        assert_eq!(remote.len().await, 1);

        // Clearing an empty cache is fine.
        cache.clear().await;
    }

    #[tokio::test]
    async fn test_zero_ttl_uses_default() {
        let cache = AmenityCache::local_only(TTL);
        let s = subject("1");

        cache.set(&s, Category::Airport, sample_places(1), Some(0), Radius::default()).await;

        assert!(cache.get(&s, Category::Airport, Radius::default()).await.is_some());
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let cache = AmenityCache::local_only(TTL);
        let s = subject("1");

        cache.set(&s, Category::Park, sample_places(1), Some(1), Radius::default()).await;
        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert!(cache.get(&s, Category::Park, Radius::default()).await.is_none());
    }

    #[tokio::test]
    async fn test_stats_reports_remote_presence() {
        assert!(!AmenityCache::local_only(TTL).stats().await.remote_available);
        assert!(with_remote(Arc::new(LocalTier::new())).stats().await.remote_available);
    }

    #[tokio::test]
    async fn test_connect_disabled_is_local_only() {
        let mut config = Config::default();
        config.redis.enabled = false;

        let cache = AmenityCache::connect(&config).await;

        assert!(!cache.stats().await.remote_available);
        assert_eq!(cache.default_ttl(), config.amenity_ttl);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_unique_sets() {
        let cache = Arc::new(with_remote(Arc::new(LocalTier::new())));
        let mut handles = Vec::new();

        for i in 0..200 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                let s = SubjectId::new(format!("p{}", i)).unwrap();
                cache.set(&s, Category::School, sample_places(1), None, Radius::default()).await;
                cache.get(&s, Category::School, Radius::default()).await
            }));
        }

        for handle in handles {
            assert!(handle.await.unwrap().is_some());
        }
        assert_eq!(cache.stats().await.local_entry_count, 200);
    }
}
