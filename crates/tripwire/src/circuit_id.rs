// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use crate::error::ConfigError;

/// The sharding key for a distributed circuit.
///
/// Two [`CircuitEngine`][crate::CircuitEngine] instances constructed with the same
/// `CircuitId` and pointed at the same store share all circuit state: trips observed by one
/// are immediately visible to the other on its next call.
///
/// # Examples
///
/// ```
/// use tripwire::CircuitId;
///
/// let id = CircuitId::new("payments-api")?;
/// assert_eq!(id.as_str(), "payments-api");
///
/// CircuitId::new("").unwrap_err();
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CircuitId(Arc<str>);

impl CircuitId {
    /// Creates a new `CircuitId`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `id` is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ConfigError::EmptyCircuitId);
        }
        Ok(Self(Arc::from(id)))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CircuitId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
