// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::Duration;

use recoverable::{Recover, Recovery};

/// The circuit is open and is fast-failing calls until `blocked-until` elapses.
///
/// Carries the caller's best estimate of how long to wait before retrying. The estimate is
/// advisory: another peer may close or re-open the circuit before `retry_after` elapses.
#[ohno::error]
#[display("circuit is open, retry after {retry_after:?}")]
pub struct CircuitOpenError {
    retry_after: Option<Duration>,
}

impl CircuitOpenError {
    /// How long the caller should wait before retrying, if known.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        self.retry_after
    }
}

impl Recover for CircuitOpenError {
    /// Transient: the circuit is expected to probe again once `blocked-until` elapses.
    fn recovery(&self) -> Recovery {
        match self.retry_after {
            Some(delay) => Recovery::retry().delay(delay),
            None => Recovery::retry(),
        }
    }
}

/// The circuit was forced open by an operator via [`CircuitEngine::isolate`][crate::CircuitEngine::isolate]
/// and accepts no automatic recovery; only [`CircuitEngine::reset`][crate::CircuitEngine::reset] clears it.
#[ohno::error]
#[display("circuit is isolated")]
pub struct CircuitIsolatedError {}

impl Recover for CircuitIsolatedError {
    /// Permanent: only an operator calling `reset` clears this, never automatic recovery.
    fn recovery(&self) -> Recovery {
        Recovery::never()
    }
}

/// An invalid combination of [`Options`][crate::Options] was supplied to [`CircuitEngine::new`][crate::CircuitEngine::new].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// `circuit_id` was empty.
    #[error("circuit_id must not be empty")]
    EmptyCircuitId,
    /// `failure_threshold` did not lie in `[0, 1]`.
    #[error("failure_threshold must lie in [0, 1], got {0}")]
    FailureThresholdOutOfRange(f32),
    /// `minimum_throughput` was `0`.
    #[error("minimum_throughput must be at least 1")]
    MinimumThroughputTooLow,
    /// `break_duration` was zero.
    #[error("break_duration must be greater than zero")]
    BreakDurationNotPositive,
    /// `sampling_duration` was zero.
    #[error("sampling_duration must be greater than zero")]
    SamplingDurationNotPositive,
}
