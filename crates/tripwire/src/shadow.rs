// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::Mutex;

use tick::Timestamp;

use crate::{CircuitState, HealthMetrics};

const ERR_POISONED_LOCK: &str = "local shadow mutex must not be poisoned";

/// A per-process, per-circuit mirror of `(state, metrics, blocked-until)`.
///
/// Used only when the store is unreachable and [`Options::local_shadow_enabled`][crate::Options::local_shadow_enabled]
/// is `true`. It is never preferred over a live store read — it exists strictly so a process cut
/// off from the store can still express *some* circuit behavior locally, unshared with peers.
///
/// All writes happen only after the corresponding authoritative write has been attempted; all
/// reads and writes of the mirror itself happen under a single process-local mutex.
#[derive(Debug, Default)]
pub(crate) struct LocalShadow {
    inner: Mutex<ShadowState>,
}

#[derive(Debug, Clone, Copy, Default)]
struct ShadowState {
    state: Option<CircuitState>,
    metrics: Option<HealthMetrics>,
    blocked_until: Option<Timestamp>,
}

impl LocalShadow {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn state(&self) -> Option<CircuitState> {
        self.inner.lock().expect(ERR_POISONED_LOCK).state
    }

    pub(crate) fn set_state(&self, state: CircuitState) {
        self.inner.lock().expect(ERR_POISONED_LOCK).state = Some(state);
    }

    pub(crate) fn metrics(&self) -> Option<HealthMetrics> {
        self.inner.lock().expect(ERR_POISONED_LOCK).metrics
    }

    pub(crate) fn set_metrics(&self, metrics: HealthMetrics) {
        self.inner.lock().expect(ERR_POISONED_LOCK).metrics = Some(metrics);
    }

    pub(crate) fn blocked_until(&self) -> Option<Timestamp> {
        self.inner.lock().expect(ERR_POISONED_LOCK).blocked_until
    }

    pub(crate) fn set_blocked_until(&self, blocked_until: Timestamp) {
        self.inner.lock().expect(ERR_POISONED_LOCK).blocked_until = Some(blocked_until);
    }

    /// Mirrors a full transition's resulting fields in one critical section.
    pub(crate) fn record_transition(&self, state: CircuitState, metrics: Option<HealthMetrics>, blocked_until: Option<Timestamp>) {
        let mut guard = self.inner.lock().expect(ERR_POISONED_LOCK);
        guard.state = Some(state);
        if let Some(metrics) = metrics {
            guard.metrics = Some(metrics);
        }
        guard.blocked_until = blocked_until;
    }
}
