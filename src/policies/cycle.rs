//! # Randomised cycle duration.
//!
//! [`CyclePolicy`] decides how long a light holds each phase. Every toggle
//! draws a fresh duration uniformly from a whole number of `step`s in
//! `[min, max]` (inclusive), so independent lights drift apart instead of
//! switching in lock-step.
//!
//! ## Defaults
//! `min = 5s`, `max = 8s`, `step = 1s` → one of {5s, 6s, 7s, 8s}, equally likely.
//!
//! ## Normalisation
//! - `min > max` → bounds are swapped
//! - `step = 0` → treated as 1ms
//! - bounds that are not multiples of `step` are rounded inwards (`min` up, `max` down);
//!   if nothing fits, `min` is returned

use rand::Rng;
use std::time::Duration;

/// Policy producing the duration of each phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CyclePolicy {
    /// Shortest phase.
    pub min: Duration,
    /// Longest phase (inclusive).
    pub max: Duration,
    /// Granularity of the drawn durations.
    pub step: Duration,
}

impl Default for CyclePolicy {
    /// Whole seconds in `[5s, 8s]`.
    fn default() -> Self {
        Self {
            min: Duration::from_secs(5),
            max: Duration::from_secs(8),
            step: Duration::from_secs(1),
        }
    }
}

impl CyclePolicy {
    /// Always returns `d`.
    pub fn fixed(d: Duration) -> Self {
        Self {
            min: d,
            max: d,
            step: Duration::from_millis(1),
        }
    }

    /// Uniform whole milliseconds in `[min, max]`.
    pub fn millis(min: u64, max: u64) -> Self {
        Self {
            min: Duration::from_millis(min),
            max: Duration::from_millis(max),
            step: Duration::from_millis(1),
        }
    }

    /// Normalised `(min, max)` bounds.
    pub fn bounds(&self) -> (Duration, Duration) {
        if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        }
    }

    /// Draws the duration of the next phase.
    pub fn next(&self) -> Duration {
        let (min, max) = self.bounds();
        let step = if self.step.is_zero() {
            Duration::from_millis(1)
        } else {
            self.step
        };
        let step_ns = step.as_nanos();

        let lo = min.as_nanos().div_ceil(step_ns);
        let hi = max.as_nanos() / step_ns;
        if lo >= hi {
            return if lo == hi { step_to(lo, step_ns) } else { min };
        }

        let mut rng = rand::rng();
        let lo = u64::try_from(lo).unwrap_or(u64::MAX);
        let hi = u64::try_from(hi).unwrap_or(u64::MAX);
        step_to(u128::from(rng.random_range(lo..=hi)), step_ns)
    }
}

fn step_to(count: u128, step_ns: u128) -> Duration {
    let ns = count.saturating_mul(step_ns);
    let secs = u64::try_from(ns / 1_000_000_000).unwrap_or(u64::MAX);
    Duration::new(secs, (ns % 1_000_000_000) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_draws_whole_seconds_in_range() {
        let policy = CyclePolicy::default();
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let d = policy.next();
            assert!(d >= Duration::from_secs(5), "{d:?} below 5s");
            assert!(d <= Duration::from_secs(8), "{d:?} above 8s");
            assert_eq!(d.subsec_nanos(), 0, "{d:?} not whole seconds");
            seen.insert(d.as_secs());
        }
        assert_eq!(seen, HashSet::from([5, 6, 7, 8]));
    }

    #[test]
    fn test_fixed() {
        let policy = CyclePolicy::fixed(Duration::from_millis(30));
        for _ in 0..20 {
            assert_eq!(policy.next(), Duration::from_millis(30));
        }
    }

    #[test]
    fn test_swapped_bounds() {
        let policy = CyclePolicy::millis(40, 10);
        assert_eq!(
            policy.bounds(),
            (Duration::from_millis(10), Duration::from_millis(40))
        );
        for _ in 0..100 {
            let d = policy.next();
            assert!(d >= Duration::from_millis(10) && d <= Duration::from_millis(40));
        }
    }

    #[test]
    fn test_zero_step_falls_back_to_millis() {
        let policy = CyclePolicy {
            min: Duration::from_millis(5),
            max: Duration::from_millis(6),
            step: Duration::ZERO,
        };
        for _ in 0..50 {
            let d = policy.next();
            assert!(d == Duration::from_millis(5) || d == Duration::from_millis(6));
        }
    }

    #[test]
    fn test_no_whole_step_in_range_returns_min() {
        let policy = CyclePolicy {
            min: Duration::from_millis(1100),
            max: Duration::from_millis(1900),
            step: Duration::from_secs(1),
        };
        assert_eq!(policy.next(), Duration::from_millis(1100));
    }
}
