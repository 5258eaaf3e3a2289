// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A distributed circuit breaker.
//!
//! A circuit breaker guards calls to a remote dependency and, once that dependency is judged
//! unhealthy, fast-fails further calls instead of letting them queue up behind a struggling
//! downstream. What makes this one *distributed* is that its state — closed, open, half-open,
//! isolated — lives in an external key-value store (see [`StateStore`]) rather than in
//! process memory. Every process sharing a [`CircuitId`] observes the same trip.
//!
//! # Overview
//!
//! - [`StateStore`] — the trait a concrete store backend implements (a Redis-backed
//!   implementation lives in the sibling `tripwire_redis` crate).
//! - [`CircuitEngine`] — the state machine. Construct one per circuit with [`Options`] and a
//!   [`tick::Clock`], then call [`CircuitEngine::execute`].
//! - [`HealthMetrics`] — the sliding-window failure counter the trip predicate reads.
//! - [`CircuitState`] — the four-value state enum: `Closed`, `Open`, `HalfOpen`, `Isolated`.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use tick::Clock;
//! use tripwire::{CircuitEngine, CircuitId, Options, testing::InMemoryStore};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let clock = Clock::new_tokio();
//! let store = InMemoryStore::new();
//! let options = Options::new(CircuitId::new("payments-api")?);
//! let engine = CircuitEngine::new(store, clock, options)?;
//!
//! let result = engine.execute(async { Ok::<_, std::io::Error>("ok") }).await;
//! # let _ = result;
//! # Ok(())
//! # }
//! ```

mod callbacks;
mod circuit_id;
mod engine;
mod error;
mod health;
mod lease;
#[cfg(feature = "otel")]
pub mod metrics;
mod options;
mod shadow;
mod state;
mod store;

#[cfg(any(feature = "test-util", test))]
pub mod testing;

pub use callbacks::TransitionArgs;
pub use circuit_id::CircuitId;
pub use engine::{CircuitEngine, ExecuteError};
pub use error::{CircuitIsolatedError, CircuitOpenError, ConfigError};
pub use health::HealthMetrics;
pub use lease::Lease;
pub use options::Options;
pub use state::CircuitState;
pub use store::StateStore;
