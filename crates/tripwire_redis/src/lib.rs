// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A Redis-backed [`StateStore`] for the `tripwire` distributed circuit breaker.
//!
//! [`RedisStore`] realizes the key layout and conditional-write/compare-and-delete contract
//! `tripwire::StateStore` requires: `SET key value NX PX ttl` for lease acquisition, and a small
//! server-side Lua script for the compare-and-delete release. Every method matches the trait's
//! failure-tolerant contract — a Redis error is caught, logged at warning level, and translated
//! into "absent" for reads, best-effort success for writes, and fail-open for lease acquisition.
//!
//! # Example
//!
//! ```no_run
//! use tick::Clock;
//! use tripwire_redis::RedisStore;
//!
//! # async fn run() -> Result<(), redis::RedisError> {
//! let store = RedisStore::connect("redis://127.0.0.1/", Clock::new_tokio()).await?;
//! # let _ = store;
//! # Ok(())
//! # }
//! ```

use std::sync::LazyLock;
use std::time::Duration;

use redis::AsyncCommands as _;
use redis::aio::ConnectionManager;
use tick::fmt::UnixSecondsTimestamp;
use tick::{Clock, Timestamp};
use tripwire::{CircuitId, CircuitState, HealthMetrics, Lease, StateStore};

/// `prefix:circuitId:state` default TTL. The state key outlives any single circuit lifecycle so
/// a long-idle circuit does not silently lose its last-known state between calls.
const STATE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Margin added on top of `samplingDuration`/`blockedUntil` so a key does not expire the instant
/// it becomes stale, racing a reader that just fetched it.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

const DEFAULT_KEY_PREFIX: &str = "cb:distributed";

/// Builds a single field's store key: `prefix:circuitId:field`.
fn store_key(prefix: &str, circuit_id: &CircuitId, field: &str) -> String {
    format!("{prefix}:{circuit_id}:{field}")
}

/// The compare-and-delete script backing [`RedisStore::release_lease`].
///
/// Checks token equality and deletes in one round trip so a lease whose TTL elapsed and was
/// re-acquired by another holder cannot be stolen by a late release from the original holder.
static RELEASE_LEASE_SCRIPT: LazyLock<redis::Script> = LazyLock::new(|| {
    redis::Script::new(
        r"
        if redis.call('GET', KEYS[1]) == ARGV[1] then
            return redis.call('DEL', KEYS[1])
        else
            return 0
        end
        ",
    )
});

/// A [`StateStore`] implementation backed by Redis's async connection manager.
///
/// Cheap to clone: [`redis::aio::ConnectionManager`] multiplexes every clone over one underlying
/// connection and reconnects transparently, so a single `RedisStore` can be shared across every
/// [`CircuitEngine`][tripwire::CircuitEngine] in a process, matching the "process-wide pooled
/// client" resource model the core spec assumes.
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
    clock: Clock,
    key_prefix: String,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").field("key_prefix", &self.key_prefix).finish_non_exhaustive()
    }
}

impl RedisStore {
    /// Opens a connection to `connection_info` and wraps it in a `RedisStore`.
    ///
    /// Uses the default key prefix (`"cb:distributed"`, matching [`Options::key_prefix`][tripwire::Options::key_prefix]'s
    /// own default); call [`RedisStore::with_key_prefix`] to override it, keeping it in sync with
    /// whatever prefix the façade configured the engine's `Options` with.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`redis::RedisError`] if the client cannot be constructed or the
    /// initial connection cannot be established.
    pub async fn connect(connection_info: &str, clock: Clock) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_info)?;
        let manager = client.get_connection_manager().await?;
        Ok(Self::new(manager, clock))
    }

    /// Wraps an already-constructed connection manager.
    #[must_use]
    pub fn new(manager: ConnectionManager, clock: Clock) -> Self {
        Self {
            manager,
            clock,
            key_prefix: DEFAULT_KEY_PREFIX.to_owned(),
        }
    }

    /// Overrides the key prefix used for every store key.
    ///
    /// Must match the `key_prefix` the owning engine's `Options` was constructed with, or the
    /// engine and this store will silently address different keys for the same `CircuitId`.
    #[must_use]
    pub fn with_key_prefix(mut self, key_prefix: impl Into<String>) -> Self {
        self.key_prefix = key_prefix.into();
        self
    }

    fn key(&self, circuit_id: &CircuitId, field: &str) -> String {
        store_key(&self.key_prefix, circuit_id, field)
    }

    async fn get_string(&self, key: &str) -> Result<Option<String>, redis::RedisError> {
        let mut conn = self.manager.clone();
        conn.get(key).await
    }

    async fn set_string_ex(&self, key: &str, value: String, ttl: Duration) -> Result<(), redis::RedisError> {
        let mut conn = self.manager.clone();
        let ttl_secs = ttl.as_secs().max(1);
        conn.set_ex(key, value, ttl_secs).await
    }
}

impl StateStore for RedisStore {
    async fn get_state(&self, circuit_id: &CircuitId) -> Option<CircuitState> {
        let key = self.key(circuit_id, "state");
        match self.get_string(&key).await {
            Ok(Some(raw)) => raw.parse().ok().or_else(|| {
                tracing::warn!(circuit.id = %circuit_id, %raw, "malformed circuit state value in store; treating as absent");
                None
            }),
            Ok(None) => None,
            Err(error) => {
                tracing::warn!(circuit.id = %circuit_id, %error, "state read failed; treating as absent");
                None
            }
        }
    }

    async fn set_state(&self, circuit_id: &CircuitId, state: CircuitState) {
        let key = self.key(circuit_id, "state");
        if let Err(error) = self.set_string_ex(&key, state.to_string(), STATE_TTL).await {
            tracing::warn!(circuit.id = %circuit_id, %error, %state, "state write failed");
        }
    }

    async fn get_metrics(&self, circuit_id: &CircuitId) -> Option<HealthMetrics> {
        let key = self.key(circuit_id, "metrics");
        match self.get_string(&key).await {
            Ok(Some(raw)) => raw.parse().ok().or_else(|| {
                tracing::warn!(circuit.id = %circuit_id, %raw, "malformed health metrics value in store; treating as absent");
                None
            }),
            Ok(None) => None,
            Err(error) => {
                tracing::warn!(circuit.id = %circuit_id, %error, "metrics read failed; treating as absent");
                None
            }
        }
    }

    async fn set_metrics(&self, circuit_id: &CircuitId, metrics: HealthMetrics, sampling_duration: Duration) {
        let key = self.key(circuit_id, "metrics");
        let ttl = sampling_duration + EXPIRY_MARGIN;
        if let Err(error) = self.set_string_ex(&key, metrics.to_string(), ttl).await {
            tracing::warn!(circuit.id = %circuit_id, %error, "metrics write failed");
        }
    }

    async fn get_blocked_until(&self, circuit_id: &CircuitId) -> Option<Timestamp> {
        let key = self.key(circuit_id, "blocked");
        match self.get_string(&key).await {
            Ok(Some(raw)) => raw
                .parse::<UnixSecondsTimestamp>()
                .map(Timestamp::from)
                .ok()
                .or_else(|| {
                    tracing::warn!(circuit.id = %circuit_id, %raw, "malformed blocked-until value in store; treating as absent");
                    None
                }),
            Ok(None) => None,
            Err(error) => {
                tracing::warn!(circuit.id = %circuit_id, %error, "blocked-until read failed; treating as absent");
                None
            }
        }
    }

    async fn set_blocked_until(&self, circuit_id: &CircuitId, blocked_until: Timestamp) {
        let now = self.clock.timestamp();
        let Ok(remaining) = blocked_until.checked_duration_since(now) else {
            // Already in the past (or clock skew put `now` ahead of it): writing it would
            // immediately expire, so skip the round trip entirely, per the store contract.
            return;
        };
        let ttl = remaining + EXPIRY_MARGIN;
        let key = self.key(circuit_id, "blocked");
        let value = UnixSecondsTimestamp::from(blocked_until).to_string();

        if let Err(error) = self.set_string_ex(&key, value, ttl).await {
            tracing::warn!(circuit.id = %circuit_id, %error, "blocked-until write failed");
        }
    }

    async fn try_acquire_lease(&self, circuit_id: &CircuitId, ttl: Duration) -> Option<Lease> {
        let key = self.key(circuit_id, "lock");
        let lease = Lease::new_random();
        let ttl_millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);

        let result: Result<Option<String>, redis::RedisError> = redis::cmd("SET")
            .arg(&key)
            .arg(lease.token())
            .arg("NX")
            .arg("PX")
            .arg(ttl_millis)
            .query_async(&mut self.manager.clone())
            .await;

        match result {
            Ok(Some(_)) => Some(lease),
            Ok(None) => None,
            Err(error) => {
                // Fail open: a store fault must not wedge transitions for every peer.
                tracing::warn!(circuit.id = %circuit_id, %error, "lease acquire failed; failing open");
                Some(lease)
            }
        }
    }

    async fn release_lease(&self, circuit_id: &CircuitId, lease: Lease) {
        let key = self.key(circuit_id, "lock");
        let result: Result<i64, redis::RedisError> = RELEASE_LEASE_SCRIPT
            .key(&key)
            .arg(lease.token())
            .invoke_async(&mut self.manager.clone())
            .await;

        if let Err(error) = result {
            tracing::warn!(circuit.id = %circuit_id, %error, "lease release failed");
        }
    }
}


/// Integration tests against a real Redis instance, run via `testcontainers`.
///
/// Requires a working Docker daemon; skipped (not merely ignored) when one is unavailable, the
/// same accommodation this codebase's own container-backed storage tests make.
#[cfg(test)]
mod integration_tests {
    use std::time::Duration;

    use testcontainers::ContainerAsync;
    use testcontainers::runners::AsyncRunner as _;
    use testcontainers_modules::redis::Redis;
    use tick::Clock;
    use tripwire::{CircuitId, CircuitState, Lease, StateStore as _};

    use super::RedisStore;

    async fn start() -> Option<(ContainerAsync<Redis>, RedisStore)> {
        let Ok(container) = Redis::default().start().await else {
            eprintln!("skipping tripwire_redis integration test: docker unavailable");
            return None;
        };
        let port = container.get_host_port_ipv4(6379).await.ok()?;
        let url = format!("redis://127.0.0.1:{port}/");
        let store = RedisStore::connect(&url, Clock::new_tokio()).await.ok()?;
        Some((container, store))
    }

    #[tokio::test]
    async fn state_round_trips_through_redis() {
        let Some((_container, store)) = start().await else { return };
        let id = CircuitId::new("svc-redis-state").unwrap();

        assert_eq!(store.get_state(&id).await, None);

        store.set_state(&id, CircuitState::Open).await;
        assert_eq!(store.get_state(&id).await, Some(CircuitState::Open));
    }

    #[tokio::test]
    async fn lease_is_mutually_exclusive_and_token_guarded_on_release() {
        let Some((_container, store)) = start().await else { return };
        let id = CircuitId::new("svc-redis-lease").unwrap();

        let first = store.try_acquire_lease(&id, Duration::from_secs(5)).await;
        assert!(first.is_some());
        assert!(store.try_acquire_lease(&id, Duration::from_secs(5)).await.is_none());

        store.release_lease(&id, Lease::from_token("not-the-real-token")).await;
        assert!(store.try_acquire_lease(&id, Duration::from_secs(5)).await.is_none());

        store.release_lease(&id, first.unwrap()).await;
        assert!(store.try_acquire_lease(&id, Duration::from_secs(5)).await.is_some());
    }

    #[tokio::test]
    async fn two_stores_against_the_same_redis_share_state() {
        let Some((_container, store_a)) = start().await else { return };
        let id = CircuitId::new("svc-redis-shared").unwrap();

        store_a.set_state(&id, CircuitState::HalfOpen).await;

        // A second handle against the same server observes the first handle's write, the same
        // cross-peer visibility property the in-memory fake exercises for the core engine.
        let store_b = RedisStore::new(store_a.manager.clone(), Clock::new_tokio());
        assert_eq!(store_b.get_state(&id).await, Some(CircuitState::HalfOpen));
    }
}
