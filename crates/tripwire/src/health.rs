// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

use tick::Timestamp;
use tick::fmt::UnixSecondsTimestamp;

/// The sliding-window failure counter that drives the trip predicate.
///
/// A single bucket `(successCount, failureCount, windowStart)` represents every call observed
/// since `windowStart`. There is no sub-bucket fidelity: the design trades histogram precision
/// for one read and one write per guarded call against the store.
///
/// A record is only current while `now - windowStart <= samplingDuration` ([`HealthMetrics::is_fresh`]);
/// once it ages past that, it must be discarded and replaced, not read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthMetrics {
    success_count: u32,
    failure_count: u32,
    window_start: Timestamp,
}

impl HealthMetrics {
    /// Creates a fresh, empty window starting at `window_start`.
    #[must_use]
    pub const fn empty(window_start: Timestamp) -> Self {
        Self {
            success_count: 0,
            failure_count: 0,
            window_start,
        }
    }

    /// The number of successful calls observed in the current window.
    #[must_use]
    pub const fn success_count(&self) -> u32 {
        self.success_count
    }

    /// The number of failed calls observed in the current window.
    #[must_use]
    pub const fn failure_count(&self) -> u32 {
        self.failure_count
    }

    /// The instant the current window started.
    #[must_use]
    pub const fn window_start(&self) -> Timestamp {
        self.window_start
    }

    /// `successCount + failureCount`.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.success_count.saturating_add(self.failure_count)
    }

    /// `failureCount / total`, or `0.0` when `total == 0`.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "call counts within a single sampling window never approach f32's precision limit"
    )]
    pub fn failure_ratio(&self) -> f32 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.failure_count as f32 / total as f32
        }
    }

    /// Whether this window is still current, i.e. `now - windowStart <= samplingDuration`.
    ///
    /// Returns `false` if `now` precedes `windowStart` (clock skew) as well as when the window
    /// has genuinely expired — either way the record must not be trusted for the trip decision.
    #[must_use]
    pub fn is_fresh(&self, now: Timestamp, sampling_duration: Duration) -> bool {
        now.checked_duration_since(self.window_start)
            .is_ok_and(|elapsed| elapsed <= sampling_duration)
    }

    /// Returns a copy of this window with one success recorded.
    #[must_use]
    pub(crate) fn with_success(self) -> Self {
        Self {
            success_count: self.success_count.saturating_add(1),
            ..self
        }
    }

    /// Returns a copy of this window with one failure recorded.
    #[must_use]
    pub(crate) fn with_failure(self) -> Self {
        Self {
            failure_count: self.failure_count.saturating_add(1),
            ..self
        }
    }
}

/// The store's string value for `HealthMetrics` did not match the expected compact encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed health metrics value: {0:?}")]
pub struct ParseHealthMetricsError(String);

impl Display for HealthMetrics {
    /// Renders the compact store value: `successCount:failureCount:windowStartEpochSeconds`.
    ///
    /// The format is implementation-defined but stable across peers of the same deployment, as
    /// required of the store's serialized value; `windowStart` uses whole Unix seconds, never a
    /// localized string.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let window_start = UnixSecondsTimestamp::from(self.window_start);
        write!(f, "{}:{}:{window_start}", self.success_count, self.failure_count)
    }
}

impl FromStr for HealthMetrics {
    type Err = ParseHealthMetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseHealthMetricsError(s.to_owned());

        let mut parts = s.splitn(3, ':');
        let success_count: u32 = parts.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
        let failure_count: u32 = parts.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
        let window_start: UnixSecondsTimestamp = parts.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;

        Ok(Self {
            success_count,
            failure_count,
            window_start: window_start.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use tick::ClockControl;

    use super::*;

    fn at(secs: u64) -> Timestamp {
        UnixSecondsTimestamp::from_secs(secs).unwrap().into()
    }

    #[test]
    fn empty_window_has_zero_ratio() {
        let metrics = HealthMetrics::empty(at(0));
        assert_eq!(metrics.total(), 0);
        assert_eq!(metrics.failure_ratio(), 0.0);
    }

    #[test]
    fn ratio_reflects_recorded_calls() {
        let metrics = HealthMetrics::empty(at(0)).with_success().with_failure().with_failure();
        assert_eq!(metrics.total(), 3);
        assert_eq!(metrics.failure_ratio(), 2.0 / 3.0);
    }

    #[test]
    fn freshness_respects_sampling_duration() {
        let metrics = HealthMetrics::empty(at(1_000));
        assert!(metrics.is_fresh(at(1_005), Duration::from_secs(10)));
        assert!(!metrics.is_fresh(at(1_020), Duration::from_secs(10)));
    }

    #[test]
    fn freshness_rejects_clock_skew_before_window_start() {
        let metrics = HealthMetrics::empty(at(1_000));
        assert!(!metrics.is_fresh(at(900), Duration::from_secs(10)));
    }

    #[test]
    fn serialization_round_trips() {
        let metrics = HealthMetrics::empty(at(1_700_000_000)).with_success().with_failure();
        let encoded = metrics.to_string();
        let decoded: HealthMetrics = encoded.parse().unwrap();
        assert_eq!(metrics, decoded);
    }

    #[test]
    fn rejects_malformed_value() {
        assert!("not-a-metrics-value".parse::<HealthMetrics>().is_err());
        assert!("1:2".parse::<HealthMetrics>().is_err());
    }

    #[test]
    fn clock_control_advances_window_relative_time() {
        let control = ClockControl::new();
        let clock = control.to_clock();
        let metrics = HealthMetrics::empty(clock.timestamp());

        control.advance(Duration::from_secs(5));
        assert!(metrics.is_fresh(clock.timestamp(), Duration::from_secs(10)));

        control.advance(Duration::from_secs(10));
        assert!(!metrics.is_fresh(clock.timestamp(), Duration::from_secs(10)));
    }
}
