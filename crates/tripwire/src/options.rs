// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Debug, Formatter};
use std::time::Duration;

use crate::callbacks::{OnClose, OnHalfOpen, OnOpen};
use crate::error::ConfigError;
use crate::CircuitId;

const DEFAULT_FAILURE_THRESHOLD: f32 = 0.5;
const DEFAULT_MINIMUM_THROUGHPUT: u32 = 5;
const DEFAULT_BREAK_DURATION: Duration = Duration::from_secs(30);
const DEFAULT_SAMPLING_DURATION: Duration = Duration::from_secs(10);
const DEFAULT_STORE_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_KEY_PREFIX: &str = "cb:distributed";

/// Lease time-to-live used for every automatic transition attempt.
///
/// Fixed rather than configurable: it only needs to outlive the longest transition's store
/// round trips, and a shorter value would shrink, not grow, the blast radius of a crashed
/// holder.
pub const LEASE_TTL: Duration = Duration::from_secs(5);

/// The configuration of a [`CircuitEngine`][crate::CircuitEngine].
///
/// This is a plain, directly-constructed option set, not a fluent builder: the only surface
/// that matters is the resulting struct, so field access and `..Options::new(id)` update
/// syntax are the whole API.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use tripwire::{CircuitId, Options};
///
/// let options = Options {
///     failure_threshold: 0.25,
///     minimum_throughput: 10,
///     ..Options::new(CircuitId::new("payments-api")?)
/// };
/// assert_eq!(options.failure_threshold, 0.25);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Options {
    /// The circuit identifier; its store keys are derived from this plus [`Options::key_prefix`].
    pub circuit_id: CircuitId,
    /// The failure ratio, in `[0, 1]`, at or above which the trip predicate fires. Default `0.5`.
    pub failure_threshold: f32,
    /// The minimum call count a window must reach before the trip predicate considers firing. Default `5`.
    pub minimum_throughput: u32,
    /// How long `Open` lasts before a probe is attempted. Default `30s`.
    pub break_duration: Duration,
    /// The width of the failure-counting sliding window. Default `10s`.
    pub sampling_duration: Duration,
    /// Whether a per-process shadow mirror backs reads when the store is unreachable. Default `true`.
    pub local_shadow_enabled: bool,
    /// The deadline applied to every individual store operation. Default `5s`.
    pub store_operation_timeout: Duration,
    /// The prefix prepended to every store key for this circuit. Default `"cb:distributed"`.
    pub key_prefix: String,
    /// Invoked after a transition into `Open`.
    pub on_open: Option<OnOpen>,
    /// Invoked after a transition into `Closed`.
    pub on_close: Option<OnClose>,
    /// Invoked after a transition into `HalfOpen`.
    pub on_half_open: Option<OnHalfOpen>,
    /// Counter incremented once per successful state transition, if the caller wired one up via
    /// [`crate::metrics::create_transition_counter`]. Additive: `None` (the default) disables
    /// metrics emission entirely without affecting any other behavior.
    #[cfg(feature = "otel")]
    pub otel_transition_counter: Option<opentelemetry::metrics::Counter<u64>>,
}

impl Options {
    /// Creates an option set with every field at its documented default except `circuit_id`.
    #[must_use]
    pub fn new(circuit_id: CircuitId) -> Self {
        Self {
            circuit_id,
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            minimum_throughput: DEFAULT_MINIMUM_THROUGHPUT,
            break_duration: DEFAULT_BREAK_DURATION,
            sampling_duration: DEFAULT_SAMPLING_DURATION,
            local_shadow_enabled: true,
            store_operation_timeout: DEFAULT_STORE_OPERATION_TIMEOUT,
            key_prefix: DEFAULT_KEY_PREFIX.to_owned(),
            on_open: None,
            on_close: None,
            on_half_open: None,
            #[cfg(feature = "otel")]
            otel_transition_counter: None,
        }
    }

    /// Validates the boundary rules from the external-interface contract.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.failure_threshold) {
            return Err(ConfigError::FailureThresholdOutOfRange(self.failure_threshold));
        }
        if self.minimum_throughput < 1 {
            return Err(ConfigError::MinimumThroughputTooLow);
        }
        if self.break_duration.is_zero() {
            return Err(ConfigError::BreakDurationNotPositive);
        }
        if self.sampling_duration.is_zero() {
            return Err(ConfigError::SamplingDurationNotPositive);
        }
        Ok(())
    }
}

impl Debug for Options {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("Options");
        builder
            .field("circuit_id", &self.circuit_id)
            .field("failure_threshold", &self.failure_threshold)
            .field("minimum_throughput", &self.minimum_throughput)
            .field("break_duration", &self.break_duration)
            .field("sampling_duration", &self.sampling_duration)
            .field("local_shadow_enabled", &self.local_shadow_enabled)
            .field("store_operation_timeout", &self.store_operation_timeout)
            .field("key_prefix", &self.key_prefix)
            .field("on_open", &self.on_open.is_some())
            .field("on_close", &self.on_close.is_some())
            .field("on_half_open", &self.on_half_open.is_some());
        #[cfg(feature = "otel")]
        builder.field("otel_transition_counter", &self.otel_transition_counter.is_some());
        builder.finish()
    }
}
