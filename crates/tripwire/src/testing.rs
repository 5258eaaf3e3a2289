// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! An in-memory [`StateStore`] for tests.
//!
//! Exposed when the `test-util` feature is enabled, or always within this crate's own tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tick::Timestamp;

use crate::{CircuitId, CircuitState, HealthMetrics, Lease, StateStore};

/// A recorded store operation, for asserting on the exact sequence of calls a test made.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOp {
    /// A state read.
    GetState(CircuitId),
    /// A state write.
    SetState(CircuitId, CircuitState),
    /// A metrics read.
    GetMetrics(CircuitId),
    /// A metrics write.
    SetMetrics(CircuitId, HealthMetrics),
    /// A `blocked-until` read.
    GetBlockedUntil(CircuitId),
    /// A `blocked-until` write.
    SetBlockedUntil(CircuitId, Timestamp),
    /// A lease acquisition attempt.
    TryAcquireLease(CircuitId),
    /// A lease release.
    ReleaseLease(CircuitId),
}

type FailPredicate = Box<dyn Fn(&StoreOp) -> bool + Send + Sync>;

#[derive(Default)]
struct Data {
    state: HashMap<CircuitId, CircuitState>,
    metrics: HashMap<CircuitId, HealthMetrics>,
    blocked_until: HashMap<CircuitId, Timestamp>,
    lease: HashMap<CircuitId, String>,
}

/// An in-memory [`StateStore`], backed by a process-local mutex rather than an external store.
///
/// Cloning an `InMemoryStore` shares the same backing data and operation log with the clone,
/// which is how a test simulates several processes sharing one external store: construct one
/// store, build a [`CircuitEngine`][crate::CircuitEngine] per "process" against clones of it.
///
/// Supports failure injection via [`InMemoryStore::fail_when`], which simulates the store being
/// unreachable rather than returning an `Err` — there is no `Err` to return, per [`StateStore`]'s
/// own contract. A failing `get_*` call answers `None`; a failing `set_*` call is a no-op; a
/// failing `try_acquire_lease` call still succeeds, per the fail-open contract.
pub struct InMemoryStore {
    data: Arc<Mutex<Data>>,
    operations: Arc<Mutex<Vec<StoreOp>>>,
    fail_when: Arc<Mutex<Option<FailPredicate>>>,
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("operations_recorded", &self.operations.lock().len())
            .field("failing", &self.fail_when.lock().is_some())
            .finish()
    }
}

impl Clone for InMemoryStore {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            operations: Arc::clone(&self.operations),
            fail_when: Arc::clone(&self.fail_when),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates a new, empty store with no failure injection configured.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(Data::default())),
            operations: Arc::new(Mutex::new(Vec::new())),
            fail_when: Arc::new(Mutex::new(None)),
        }
    }

    /// Sets a predicate that determines when an operation should simulate store unreachability.
    pub fn fail_when<F>(&self, predicate: F)
    where
        F: Fn(&StoreOp) -> bool + Send + Sync + 'static,
    {
        *self.fail_when.lock() = Some(Box::new(predicate));
    }

    /// Clears the failure predicate, returning the store to always-reachable.
    pub fn clear_failures(&self) {
        *self.fail_when.lock() = None;
    }

    /// Returns a clone of every operation recorded so far, in order.
    #[must_use]
    pub fn operations(&self) -> Vec<StoreOp> {
        self.operations.lock().clone()
    }

    /// Returns whether `op` should simulate a store fault, recording it regardless.
    fn record(&self, op: StoreOp) -> bool {
        let failing = self.fail_when.lock().as_ref().is_some_and(|predicate| predicate(&op));
        self.operations.lock().push(op);
        failing
    }
}

impl StateStore for InMemoryStore {
    async fn get_state(&self, circuit_id: &CircuitId) -> Option<CircuitState> {
        if self.record(StoreOp::GetState(circuit_id.clone())) {
            return None;
        }
        self.data.lock().state.get(circuit_id).copied()
    }

    async fn set_state(&self, circuit_id: &CircuitId, state: CircuitState) {
        if self.record(StoreOp::SetState(circuit_id.clone(), state)) {
            return;
        }
        self.data.lock().state.insert(circuit_id.clone(), state);
    }

    async fn get_metrics(&self, circuit_id: &CircuitId) -> Option<HealthMetrics> {
        if self.record(StoreOp::GetMetrics(circuit_id.clone())) {
            return None;
        }
        self.data.lock().metrics.get(circuit_id).copied()
    }

    async fn set_metrics(&self, circuit_id: &CircuitId, metrics: HealthMetrics, _sampling_duration: Duration) {
        if self.record(StoreOp::SetMetrics(circuit_id.clone(), metrics)) {
            return;
        }
        self.data.lock().metrics.insert(circuit_id.clone(), metrics);
    }

    async fn get_blocked_until(&self, circuit_id: &CircuitId) -> Option<Timestamp> {
        if self.record(StoreOp::GetBlockedUntil(circuit_id.clone())) {
            return None;
        }
        self.data.lock().blocked_until.get(circuit_id).copied()
    }

    async fn set_blocked_until(&self, circuit_id: &CircuitId, blocked_until: Timestamp) {
        if self.record(StoreOp::SetBlockedUntil(circuit_id.clone(), blocked_until)) {
            return;
        }
        self.data.lock().blocked_until.insert(circuit_id.clone(), blocked_until);
    }

    async fn try_acquire_lease(&self, circuit_id: &CircuitId, _ttl: Duration) -> Option<Lease> {
        if self.record(StoreOp::TryAcquireLease(circuit_id.clone())) {
            return Some(Lease::new_random());
        }

        let mut data = self.data.lock();
        if data.lease.contains_key(circuit_id) {
            return None;
        }
        let lease = Lease::new_random();
        data.lease.insert(circuit_id.clone(), lease.token().to_owned());
        Some(lease)
    }

    async fn release_lease(&self, circuit_id: &CircuitId, lease: Lease) {
        if self.record(StoreOp::ReleaseLease(circuit_id.clone())) {
            return;
        }

        let mut data = self.data.lock();
        if data.lease.get(circuit_id).map(String::as_str) == Some(lease.token()) {
            data.lease.remove(circuit_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_operations_in_order() {
        let store = InMemoryStore::new();
        let id = CircuitId::new("svc").unwrap();

        let _ = store.get_state(&id).await;
        store.set_state(&id, CircuitState::Open).await;

        let ops = store.operations();
        assert_eq!(ops, vec![StoreOp::GetState(id.clone()), StoreOp::SetState(id, CircuitState::Open)]);
    }

    #[tokio::test]
    async fn reflects_writes_on_subsequent_reads() {
        let store = InMemoryStore::new();
        let id = CircuitId::new("svc").unwrap();

        store.set_state(&id, CircuitState::Open).await;
        assert_eq!(store.get_state(&id).await, Some(CircuitState::Open));
    }

    #[tokio::test]
    async fn failure_injection_makes_reads_absent_and_writes_no_ops() {
        let store = InMemoryStore::new();
        let id = CircuitId::new("svc").unwrap();
        store.set_state(&id, CircuitState::Open).await;

        store.fail_when(|op| matches!(op, StoreOp::GetState(_) | StoreOp::SetState(..)));

        assert_eq!(store.get_state(&id).await, None);
        store.set_state(&id, CircuitState::Closed).await;

        store.clear_failures();
        assert_eq!(store.get_state(&id).await, Some(CircuitState::Open));
    }

    #[tokio::test]
    async fn lease_acquisition_is_mutually_exclusive() {
        let store = InMemoryStore::new();
        let id = CircuitId::new("svc").unwrap();

        let first = store.try_acquire_lease(&id, Duration::from_secs(5)).await;
        assert!(first.is_some());
        assert!(store.try_acquire_lease(&id, Duration::from_secs(5)).await.is_none());

        store.release_lease(&id, first.unwrap()).await;
        assert!(store.try_acquire_lease(&id, Duration::from_secs(5)).await.is_some());
    }

    #[tokio::test]
    async fn lease_acquisition_fails_open_when_unreachable() {
        let store = InMemoryStore::new();
        let id = CircuitId::new("svc").unwrap();
        store.fail_when(|_| true);

        assert!(store.try_acquire_lease(&id, Duration::from_secs(5)).await.is_some());
        assert!(store.try_acquire_lease(&id, Duration::from_secs(5)).await.is_some());
    }

    #[tokio::test]
    async fn release_only_clears_a_matching_token() {
        let store = InMemoryStore::new();
        let id = CircuitId::new("svc").unwrap();

        let lease = store.try_acquire_lease(&id, Duration::from_secs(5)).await.unwrap();
        store.release_lease(&id, Lease::from_token("not-the-real-token")).await;

        assert!(store.try_acquire_lease(&id, Duration::from_secs(5)).await.is_none());
        store.release_lease(&id, lease).await;
        assert!(store.try_acquire_lease(&id, Duration::from_secs(5)).await.is_some());
    }
}
