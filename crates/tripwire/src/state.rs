// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// The state of a distributed circuit.
///
/// These four variants, and their wire-form names below, are bit-stable: every peer sharing a
/// [`CircuitId`][crate::CircuitId] must agree on exactly this spelling when reading and writing
/// the store's state key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CircuitState {
    /// Normal operation. Calls are allowed through.
    Closed,
    /// Tripped. Calls fast-fail until `blocked-until` elapses.
    Open,
    /// A single probe call is permitted to decide the next transition.
    HalfOpen,
    /// Forced open by an operator. No automatic recovery.
    Isolated,
}

impl CircuitState {
    const CLOSED: &'static str = "Closed";
    const OPEN: &'static str = "Open";
    const HALF_OPEN: &'static str = "HalfOpen";
    const ISOLATED: &'static str = "Isolated";

    /// Returns the bit-stable wire-form name of this state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => Self::CLOSED,
            Self::Open => Self::OPEN,
            Self::HalfOpen => Self::HALF_OPEN,
            Self::Isolated => Self::ISOLATED,
        }
    }
}

impl Display for CircuitState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The state string read from the store did not match a known [`CircuitState`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized circuit state: {0:?}")]
pub struct ParseCircuitStateError(String);

impl FromStr for CircuitState {
    type Err = ParseCircuitStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::CLOSED => Ok(Self::Closed),
            Self::OPEN => Ok(Self::Open),
            Self::HALF_OPEN => Ok(Self::HalfOpen),
            Self::ISOLATED => Ok(Self::Isolated),
            other => Err(ParseCircuitStateError(other.to_owned())),
        }
    }
}
