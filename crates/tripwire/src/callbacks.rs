// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::Arc;

use tick::Timestamp;

use crate::{CircuitId, CircuitState};

/// The arguments passed to an `on_open`/`on_close`/`on_half_open` callback.
///
/// Exactly one callback invocation happens per successful transition, emitted after the
/// store writes for that transition and before the lease guarding it is released. A callback
/// that panics or otherwise fails is caught and logged; it never influences the transition or
/// the caller's own outcome from [`CircuitEngine::execute`][crate::CircuitEngine::execute].
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct TransitionArgs<'a> {
    circuit_id: &'a CircuitId,
    prior_state: CircuitState,
    new_state: CircuitState,
    timestamp: Timestamp,
    triggering_error: Option<&'a (dyn std::error::Error + Send + Sync)>,
}

impl<'a> TransitionArgs<'a> {
    pub(crate) const fn new(
        circuit_id: &'a CircuitId,
        prior_state: CircuitState,
        new_state: CircuitState,
        timestamp: Timestamp,
        triggering_error: Option<&'a (dyn std::error::Error + Send + Sync)>,
    ) -> Self {
        Self {
            circuit_id,
            prior_state,
            new_state,
            timestamp,
            triggering_error,
        }
    }

    /// The circuit that transitioned.
    #[must_use]
    pub const fn circuit_id(&self) -> &CircuitId {
        self.circuit_id
    }

    /// The state observed immediately before this transition.
    #[must_use]
    pub const fn prior_state(&self) -> CircuitState {
        self.prior_state
    }

    /// The state this transition moved to.
    #[must_use]
    pub const fn new_state(&self) -> CircuitState {
        self.new_state
    }

    /// When the transition's store writes were applied.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// The guarded-call error that triggered this transition, if any.
    ///
    /// Present for `Closed -> Open` and `HalfOpen -> Open`; absent for transitions triggered by
    /// a success or by a manual `reset`/`isolate`.
    #[must_use]
    pub fn triggering_error(&self) -> Option<&(dyn std::error::Error + Send + Sync)> {
        self.triggering_error
    }
}

/// A callback invoked after a transition into [`CircuitState::Open`].
pub type OnOpen = Arc<dyn Fn(&TransitionArgs<'_>) + Send + Sync>;

/// A callback invoked after a transition into [`CircuitState::Closed`].
pub type OnClose = Arc<dyn Fn(&TransitionArgs<'_>) + Send + Sync>;

/// A callback invoked after a transition into [`CircuitState::HalfOpen`].
pub type OnHalfOpen = Arc<dyn Fn(&TransitionArgs<'_>) + Send + Sync>;

pub(crate) fn invoke(callback: Option<&(dyn Fn(&TransitionArgs<'_>) + Send + Sync)>, args: &TransitionArgs<'_>) {
    let Some(callback) = callback else { return };

    // Callback exceptions must never propagate out of the engine or affect the caller's
    // outcome; panics are caught at this single call site rather than threaded through
    // every transition path.
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| callback(args)));
    if let Err(panic) = result {
        let message = panic
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("non-string panic payload");
        tracing::warn!(
            circuit.id = %args.circuit_id(),
            circuit.prior_state = %args.prior_state(),
            circuit.new_state = %args.new_state(),
            panic.message = message,
            "circuit breaker transition callback panicked; ignoring"
        );
    }
}
