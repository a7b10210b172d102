//! # Traffic light configuration.
//!
//! Provides [`Config`], the settings a [`TrafficLight`](crate::TrafficLight) is built with.
//!
//! ## Sentinel values
//! - `wait_poll = 0s` → waiters do not pause between receives
//! - empty `thread_name` → cycle threads are named `phaselight-cycle-<id>`

use std::time::Duration;

use crate::policies::CyclePolicy;

const DEFAULT_THREAD_NAME: &str = "phaselight-cycle";

/// Settings for one traffic light.
///
/// ## Field semantics
/// - `cycle`: duration drawn for each phase
/// - `wait_poll`: pause between receives inside `wait_for_green` (`0s` = none)
/// - `thread_name`: prefix of the cycle thread's name; the light id is appended
#[derive(Clone, Debug)]
pub struct Config {
    /// Phase duration policy.
    pub cycle: CyclePolicy,

    /// Short pause taken by `wait_for_green` before each receive.
    ///
    /// Bounds how often a waiter re-enters the queue when it keeps
    /// receiving red.
    pub wait_poll: Duration,

    /// Prefix for the cycle thread name.
    pub thread_name: &'static str,
}

impl Config {
    /// Returns the waiter pause as an `Option`.
    ///
    /// - `None` → no pause
    /// - `Some(d)` → sleep `d` before each receive
    #[inline]
    pub fn wait_pause(&self) -> Option<Duration> {
        if self.wait_poll.is_zero() {
            None
        } else {
            Some(self.wait_poll)
        }
    }

    /// Full thread name for the cycle of light `id`.
    pub fn thread_name_for(&self, id: u64) -> String {
        let prefix = if self.thread_name.is_empty() {
            DEFAULT_THREAD_NAME
        } else {
            self.thread_name
        };
        format!("{prefix}-{id}")
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `cycle = CyclePolicy::default()` (whole seconds in 5s..=8s)
    /// - `wait_poll = 1ms`
    /// - `thread_name = "phaselight-cycle"`
    fn default() -> Self {
        Self {
            cycle: CyclePolicy::default(),
            wait_poll: Duration::from_millis(1),
            thread_name: DEFAULT_THREAD_NAME,
        }
    }
}
