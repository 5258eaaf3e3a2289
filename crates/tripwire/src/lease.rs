// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// A held mutual-exclusion lease on a circuit's lock key.
///
/// The store produces a `Lease` from [`StateStore::try_acquire_lease`][crate::StateStore::try_acquire_lease]
/// and consumes it in [`StateStore::release_lease`][crate::StateStore::release_lease]. The token
/// is never stored in shared mutable state on the store façade itself — it travels with the
/// `Lease` value so two overlapping transitions in the same process cannot share one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lease {
    token: String,
}

impl Lease {
    /// Generates a new lease with a fresh random token.
    ///
    /// Store implementations call this when a conditional acquire write succeeds (or, per the
    /// fail-open contract, when the store itself could not be reached).
    #[must_use]
    pub fn new_random() -> Self {
        Self {
            token: format!("{:032x}", fastrand::u128(..)),
        }
    }

    /// Constructs a lease around an explicit token.
    ///
    /// Exposed for store implementations that need to round-trip a token read back from the
    /// store (for example, to compare it during release).
    #[must_use]
    pub fn from_token(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    /// The lease's token, as written to the store's lock key.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

#[cfg(test)]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Lease: Send, Sync, Clone, Eq, std::fmt::Debug);

    #[test]
    fn random_leases_do_not_collide() {
        let a = Lease::new_random();
        let b = Lease::new_random();
        assert_ne!(a.token(), b.token());
    }

    #[test]
    fn from_token_preserves_value() {
        let lease = Lease::from_token("abc123");
        assert_eq!(lease.token(), "abc123");
    }
}
