// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Optional OpenTelemetry metrics, mirroring this codebase's existing pattern of making metrics
//! emission additive and opt-in rather than required for core correctness.
//!
//! Nothing under this module is reachable unless the `otel` feature is enabled; `CircuitEngine`
//! works identically, minus the emitted counter, without it.

use opentelemetry::InstrumentationScope;
use opentelemetry::metrics::{Counter, Meter, MeterProvider};

const METER_NAME: &str = "tripwire";
const VERSION: &str = "v0.1.0";

/// Key used to annotate the circuit identifier a metric was emitted for.
pub const CIRCUIT_ID: &str = "circuit_breaker.id";
/// Key used to annotate the state a circuit transitioned into.
pub const CIRCUIT_STATE: &str = "circuit_breaker.state";

/// Creates this crate's instrumentation-scoped [`Meter`].
#[must_use]
pub fn create_meter(meter_provider: &dyn MeterProvider) -> Meter {
    meter_provider.meter_with_scope(InstrumentationScope::builder(METER_NAME).with_version(VERSION).build())
}

/// Creates the counter incremented once per successful state transition.
#[must_use]
pub fn create_transition_counter(meter: &Meter) -> Counter<u64> {
    meter
        .u64_counter("circuit_breaker.transition")
        .with_description("Emitted once per successful circuit breaker state transition.")
        .build()
}
