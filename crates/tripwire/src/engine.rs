// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::future::Future;

use tick::{Clock, FutureExt as _, Timestamp};

use crate::callbacks::{self, TransitionArgs};
use crate::error::{CircuitIsolatedError, CircuitOpenError, ConfigError};
use crate::health::HealthMetrics;
use crate::lease::Lease;
use crate::options::{Options, LEASE_TTL};
use crate::state::CircuitState;
use crate::shadow::LocalShadow;
use crate::store::StateStore;

/// The distributed circuit breaker state machine.
///
/// Wraps a [`StateStore`] and drives it through the `Closed -> Open -> HalfOpen -> Closed` cycle
/// (plus the manual `Isolated` escape hatch) as calls made through [`CircuitEngine::execute`]
/// succeed or fail. Every automatic transition is guarded by a lease acquired from the store, so
/// that concurrently-running processes sharing the same `circuit_id` apply a transition exactly
/// once rather than racing each other.
///
/// Cheap to clone-and-share: construct one per `circuit_id` and hold it behind an `Arc` (or just
/// a plain value, since the only interior mutability is the optional local shadow mutex).
pub struct CircuitEngine<S: StateStore> {
    store: S,
    clock: Clock,
    options: Options,
    shadow: LocalShadow,
}

/// The error returned by [`CircuitEngine::execute`].
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError<E> {
    /// The circuit is open; the guarded future was not run.
    #[error(transparent)]
    Open(#[from] CircuitOpenError),
    /// The circuit is isolated; the guarded future was not run.
    #[error(transparent)]
    Isolated(#[from] CircuitIsolatedError),
    /// The guarded future ran and returned an error.
    #[error(transparent)]
    Inner(E),
}

impl<S: StateStore> CircuitEngine<S> {
    /// Creates a new engine, rejecting an invalid [`Options`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any of `options`'s boundary rules is violated.
    pub fn new(store: S, clock: Clock, options: Options) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self {
            store,
            clock,
            options,
            shadow: LocalShadow::new(),
        })
    }

    /// The circuit identifier this engine was constructed for.
    #[must_use]
    pub fn circuit_id(&self) -> &crate::CircuitId {
        &self.options.circuit_id
    }

    /// Returns the circuit's current state, on a best-effort basis.
    ///
    /// This is a point-in-time read with no special guarantees: by the time the caller acts on
    /// it, another process may have already moved the circuit on. Prefer [`CircuitEngine::execute`]
    /// itself for anything that needs to gate on circuit state.
    pub async fn current_state(&self) -> CircuitState {
        self.read_effective_state().await
    }

    /// Runs `future` through the circuit, applying and recording the breaker's state.
    ///
    /// If the circuit is `Isolated`, or `Open` and not yet due for a probe, `future` is never
    /// polled and an [`ExecuteError::Isolated`] or [`ExecuteError::Open`] is returned instead.
    /// Otherwise `future` runs, its outcome updates the health metrics window, and that outcome
    /// may itself drive an automatic transition before `execute` returns.
    ///
    /// # Errors
    ///
    /// Returns [`ExecuteError::Open`] or [`ExecuteError::Isolated`] if the call was fast-failed,
    /// or [`ExecuteError::Inner`] carrying `future`'s own error if it ran and failed.
    pub async fn execute<F, T, E>(&self, future: F) -> Result<T, ExecuteError<E>>
    where
        F: Future<Output = Result<T, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let effective_state = match self.read_effective_state().await {
            CircuitState::Isolated => return Err(CircuitIsolatedError::new().into()),
            CircuitState::Open => self.admit_through_open().await?,
            state @ (CircuitState::Closed | CircuitState::HalfOpen) => state,
        };

        match future.await {
            Ok(value) => {
                self.record_success().await;
                if effective_state == CircuitState::HalfOpen {
                    self.transition_to_closed().await;
                }
                Ok(value)
            }
            Err(err) => {
                let now = self.clock.timestamp();
                let metrics = self.record_failure().await;

                if effective_state == CircuitState::HalfOpen {
                    self.transition_to_open(CircuitState::HalfOpen, Some(&err)).await;
                } else if effective_state == CircuitState::Closed
                    && Self::trip_predicate_fires(&metrics, now, &self.options)
                {
                    self.transition_to_open(CircuitState::Closed, Some(&err)).await;
                }

                Err(ExecuteError::Inner(err))
            }
        }
    }

    /// Decides whether an `Open` circuit admits this call, attempting the `Open -> HalfOpen`
    /// probe transition when `blocked-until` has elapsed.
    async fn admit_through_open<E>(&self) -> Result<CircuitState, ExecuteError<E>> {
        let blocked_until = self.read_effective_blocked_until().await;
        let now = self.clock.timestamp();
        let due_for_probe = blocked_until.is_some_and(|deadline| now >= deadline);

        if due_for_probe && self.transition_open_to_half_open().await {
            return Ok(CircuitState::HalfOpen);
        }

        Err(CircuitOpenError::new(Self::retry_after(blocked_until, now, self.options.break_duration)).into())
    }

    fn retry_after(blocked_until: Option<Timestamp>, now: Timestamp, break_duration: std::time::Duration) -> Option<std::time::Duration> {
        match blocked_until {
            Some(deadline) => Some(deadline.checked_duration_since(now).unwrap_or(std::time::Duration::ZERO)),
            None => Some(break_duration),
        }
    }

    /// Forces the circuit into `Isolated`, bypassing the trip predicate entirely.
    ///
    /// Only [`CircuitEngine::reset`] clears it; the automatic transitions never leave `Isolated`
    /// on their own. Unlike the automatic transitions, this writes directly without acquiring a
    /// lease: isolation is meant to win unconditionally over whatever is in flight.
    pub async fn isolate(&self) {
        self.write_state_best_effort(CircuitState::Isolated).await;
        if self.options.local_shadow_enabled {
            self.shadow.set_state(CircuitState::Isolated);
        }
    }

    /// Forces the circuit back to `Closed` with a fresh metrics window, clearing `Isolated` or
    /// any other state.
    ///
    /// Follows the same lease-guarded write path as the automatic transitions, but does not
    /// require a particular precondition state and does not abort if the lease could not be
    /// acquired: a caller invoking `reset` wants it to take effect, not to silently no-op because
    /// another transition happened to be in flight.
    pub async fn reset(&self) {
        let lease = self.try_acquire_lease().await;
        let now = self.clock.timestamp();
        let fresh_metrics = HealthMetrics::empty(now);

        self.write_state_best_effort(CircuitState::Closed).await;
        self.write_metrics_best_effort(fresh_metrics).await;

        if self.options.local_shadow_enabled {
            self.shadow.record_transition(CircuitState::Closed, Some(fresh_metrics), None);
        }

        if let Some(lease) = lease {
            self.release_lease(lease).await;
        }
    }

    /// Consumes the engine.
    ///
    /// The engine itself holds no resources beyond the store handle and a process-local mutex;
    /// this exists to give callers an explicit, symmetric counterpart to construction rather than
    /// relying on an implicit drop.
    pub fn dispose(self) {
        drop(self);
    }

    async fn read_effective_state(&self) -> CircuitState {
        let from_store = self
            .store
            .get_state(&self.options.circuit_id)
            .timeout(self.options.store_operation_timeout, &self.clock)
            .await
            .ok()
            .flatten();

        if let Some(state) = from_store {
            return state;
        }
        if self.options.local_shadow_enabled {
            if let Some(state) = self.shadow.state() {
                return state;
            }
        }
        CircuitState::Closed
    }

    async fn read_effective_blocked_until(&self) -> Option<Timestamp> {
        let from_store = self
            .store
            .get_blocked_until(&self.options.circuit_id)
            .timeout(self.options.store_operation_timeout, &self.clock)
            .await
            .ok()
            .flatten();

        if from_store.is_some() {
            return from_store;
        }
        if self.options.local_shadow_enabled {
            return self.shadow.blocked_until();
        }
        None
    }

    async fn read_effective_metrics(&self, now: Timestamp) -> HealthMetrics {
        let from_store = self
            .store
            .get_metrics(&self.options.circuit_id)
            .timeout(self.options.store_operation_timeout, &self.clock)
            .await
            .ok()
            .flatten();

        let candidate = from_store.or_else(|| {
            if self.options.local_shadow_enabled {
                self.shadow.metrics()
            } else {
                None
            }
        });

        match candidate {
            Some(metrics) if metrics.is_fresh(now, self.options.sampling_duration) => metrics,
            _ => HealthMetrics::empty(now),
        }
    }

    fn trip_predicate_fires(metrics: &HealthMetrics, now: Timestamp, options: &Options) -> bool {
        metrics.is_fresh(now, options.sampling_duration)
            && metrics.total() >= options.minimum_throughput
            && metrics.failure_ratio() >= options.failure_threshold
    }

    async fn record_success(&self) -> HealthMetrics {
        self.update_metrics(HealthMetrics::with_success).await
    }

    async fn record_failure(&self) -> HealthMetrics {
        self.update_metrics(HealthMetrics::with_failure).await
    }

    async fn update_metrics(&self, mutate: impl FnOnce(HealthMetrics) -> HealthMetrics) -> HealthMetrics {
        let now = self.clock.timestamp();
        let current = self.read_effective_metrics(now).await;
        let updated = mutate(current);

        self.write_metrics_best_effort(updated).await;
        if self.options.local_shadow_enabled {
            self.shadow.set_metrics(updated);
        }

        updated
    }

    async fn try_acquire_lease(&self) -> Option<Lease> {
        self.store
            .try_acquire_lease(&self.options.circuit_id, LEASE_TTL)
            .timeout(self.options.store_operation_timeout, &self.clock)
            .await
            .ok()
            .flatten()
    }

    async fn release_lease(&self, lease: Lease) {
        let _ = self
            .store
            .release_lease(&self.options.circuit_id, lease)
            .timeout(self.options.store_operation_timeout, &self.clock)
            .await;
    }

    async fn write_state_best_effort(&self, state: CircuitState) {
        let _ = self
            .store
            .set_state(&self.options.circuit_id, state)
            .timeout(self.options.store_operation_timeout, &self.clock)
            .await;
    }

    async fn write_metrics_best_effort(&self, metrics: HealthMetrics) {
        let _ = self
            .store
            .set_metrics(&self.options.circuit_id, metrics, self.options.sampling_duration)
            .timeout(self.options.store_operation_timeout, &self.clock)
            .await;
    }

    async fn write_blocked_until_best_effort(&self, blocked_until: Timestamp) {
        let _ = self
            .store
            .set_blocked_until(&self.options.circuit_id, blocked_until)
            .timeout(self.options.store_operation_timeout, &self.clock)
            .await;
    }

    /// Increments the caller-supplied transition counter, if wired up via
    /// [`Options::otel_transition_counter`]. A no-op when the `otel` feature is disabled or no
    /// counter was provided.
    #[cfg(feature = "otel")]
    fn record_otel_transition(&self, new_state: CircuitState) {
        if let Some(counter) = &self.options.otel_transition_counter {
            counter.add(1, &[opentelemetry::KeyValue::new(crate::metrics::CIRCUIT_ID, self.options.circuit_id.to_string()), opentelemetry::KeyValue::new(crate::metrics::CIRCUIT_STATE, new_state.as_str())]);
        }
    }

    #[cfg(not(feature = "otel"))]
    const fn record_otel_transition(&self, _new_state: CircuitState) {}

    /// Begins an automatic transition: acquires the lease, then re-reads state under it and
    /// aborts if it no longer matches `precondition`. Returns the held lease on success.
    async fn begin_transition(&self, precondition: CircuitState) -> Option<Lease> {
        let lease = self.try_acquire_lease().await?;

        if self.read_effective_state().await != precondition {
            self.release_lease(lease).await;
            return None;
        }
        Some(lease)
    }

    async fn transition_open_to_half_open(&self) -> bool {
        let Some(lease) = self.begin_transition(CircuitState::Open).await else {
            tracing::debug!(circuit.id = %self.options.circuit_id, circuit.transition = "Open->HalfOpen", "transition aborted; lease contended or precondition stale");
            return false;
        };
        let now = self.clock.timestamp();

        self.write_state_best_effort(CircuitState::HalfOpen).await;
        if self.options.local_shadow_enabled {
            // `blocked-until` is left untouched: it only matters while `Open`.
            self.shadow.set_state(CircuitState::HalfOpen);
        }

        tracing::debug!(circuit.id = %self.options.circuit_id, circuit.prior_state = %CircuitState::Open, circuit.new_state = %CircuitState::HalfOpen, "circuit transitioned");
        self.record_otel_transition(CircuitState::HalfOpen);
        let args = TransitionArgs::new(&self.options.circuit_id, CircuitState::Open, CircuitState::HalfOpen, now, None);
        callbacks::invoke(self.options.on_half_open.as_deref(), &args);

        self.release_lease(lease).await;
        true
    }

    async fn transition_to_closed(&self) -> bool {
        let Some(lease) = self.begin_transition(CircuitState::HalfOpen).await else {
            tracing::debug!(circuit.id = %self.options.circuit_id, circuit.transition = "HalfOpen->Closed", "transition aborted; lease contended or precondition stale");
            return false;
        };
        let now = self.clock.timestamp();
        let fresh_metrics = HealthMetrics::empty(now);

        self.write_state_best_effort(CircuitState::Closed).await;
        self.write_metrics_best_effort(fresh_metrics).await;
        if self.options.local_shadow_enabled {
            self.shadow.record_transition(CircuitState::Closed, Some(fresh_metrics), None);
        }

        tracing::debug!(circuit.id = %self.options.circuit_id, circuit.prior_state = %CircuitState::HalfOpen, circuit.new_state = %CircuitState::Closed, "circuit transitioned");
        self.record_otel_transition(CircuitState::Closed);
        let args = TransitionArgs::new(&self.options.circuit_id, CircuitState::HalfOpen, CircuitState::Closed, now, None);
        callbacks::invoke(self.options.on_close.as_deref(), &args);

        self.release_lease(lease).await;
        true
    }

    /// Transitions `precondition -> Open`, used for both `Closed -> Open` and `HalfOpen -> Open`.
    async fn transition_to_open(&self, precondition: CircuitState, triggering_error: Option<&(dyn std::error::Error + Send + Sync)>) -> bool {
        let Some(lease) = self.begin_transition(precondition).await else {
            tracing::debug!(circuit.id = %self.options.circuit_id, circuit.prior_state = %precondition, circuit.transition = "->Open", "transition aborted; lease contended or precondition stale");
            return false;
        };
        let now = self.clock.timestamp();
        let blocked_until = now.saturating_add(self.options.break_duration);

        self.write_state_best_effort(CircuitState::Open).await;
        self.write_blocked_until_best_effort(blocked_until).await;
        if self.options.local_shadow_enabled {
            self.shadow.record_transition(CircuitState::Open, None, Some(blocked_until));
        }

        tracing::warn!(circuit.id = %self.options.circuit_id, circuit.prior_state = %precondition, circuit.new_state = %CircuitState::Open, "circuit tripped open");
        self.record_otel_transition(CircuitState::Open);
        let args = TransitionArgs::new(&self.options.circuit_id, precondition, CircuitState::Open, now, triggering_error);
        callbacks::invoke(self.options.on_open.as_deref(), &args);

        self.release_lease(lease).await;
        true
    }
}
