// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::Duration;

use tick::Timestamp;

use crate::{CircuitId, CircuitState, HealthMetrics, Lease};

/// A thin, total, failure-tolerant façade over the external key-value store.
///
/// Implementations back the four pieces of authoritative circuit state — the state enum, the
/// health metrics window, `blocked-until`, and the mutual-exclusion lease — with reads and
/// writes against a shared store (Redis, in the companion `tripwire_redis` crate). Every method
/// is infallible from the caller's perspective: a store exception must be caught inside the
/// implementation, logged, and translated per the table below rather than returned as an `Err`.
///
/// | Method | On store error |
/// |---|---|
/// | `get_state`, `get_metrics`, `get_blocked_until` | return `None` ("absent") |
/// | `set_state`, `set_metrics`, `set_blocked_until` | log and return (best-effort) |
/// | `try_acquire_lease` | **fail open**: return `Some(Lease)` so a store fault cannot wedge transitions |
/// | `release_lease` | log and return (a release that never reaches the store is harmless; the TTL bounds the blast radius) |
///
/// [`CircuitEngine`][crate::CircuitEngine] is generic over this trait rather than using dynamic
/// dispatch: a single process typically runs against one concrete store, so the extra
/// indirection of a trait object buys nothing.
#[trait_variant::make(Send)]
pub trait StateStore: Send + Sync {
    /// Reads the current state, or `None` if absent or the store is unreachable.
    async fn get_state(&self, circuit_id: &CircuitId) -> Option<CircuitState>;

    /// Writes the current state. Best-effort: failures are logged, not surfaced.
    async fn set_state(&self, circuit_id: &CircuitId, state: CircuitState);

    /// Reads the current health metrics window, or `None` if absent or the store is unreachable.
    async fn get_metrics(&self, circuit_id: &CircuitId) -> Option<HealthMetrics>;

    /// Writes the health metrics window with a store TTL of `sampling_duration` plus a margin.
    ///
    /// Best-effort: failures are logged, not surfaced.
    async fn set_metrics(&self, circuit_id: &CircuitId, metrics: HealthMetrics, sampling_duration: Duration);

    /// Reads `blocked-until`, or `None` if absent, expired, or the store is unreachable.
    async fn get_blocked_until(&self, circuit_id: &CircuitId) -> Option<Timestamp>;

    /// Writes `blocked-until`. Best-effort: failures are logged, not surfaced.
    async fn set_blocked_until(&self, circuit_id: &CircuitId, blocked_until: Timestamp);

    /// Attempts to acquire the circuit's transition lease for `ttl`.
    ///
    /// Returns `Some(Lease)` both on a genuine conditional-write win and, per the fail-open
    /// contract, whenever the store itself could not be reached. Returns `None` only when the
    /// store was reachable and reports the lease is already held.
    async fn try_acquire_lease(&self, circuit_id: &CircuitId, ttl: Duration) -> Option<Lease>;

    /// Releases a held lease.
    ///
    /// MUST be an atomic compare-and-delete keyed on the lease's token: a lease whose TTL has
    /// elapsed and been re-acquired by another holder must not be released by this call.
    async fn release_lease(&self, circuit_id: &CircuitId, lease: Lease);
}
