//! # Diagnostic events emitted by traffic lights.
//!
//! [`EventKind`] classifies what happened; [`Event`] carries the light id,
//! the phase reached and timing metadata.
//!
//! ## Ordering guarantees
//! Each event has a process-wide sequence number (`seq`) that increases
//! monotonically. Events of one light are emitted from its cycle thread, in order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use phaselight::{Event, EventKind, Phase};
//!
//! let ev = Event::new(EventKind::PhaseChanged)
//!     .with_light(3)
//!     .with_phase(Phase::Green)
//!     .with_delay(Duration::from_secs(6));
//!
//! assert_eq!(ev.light, Some(3));
//! assert_eq!(ev.phase, Some(Phase::Green));
//! assert_eq!(ev.delay_ms, Some(6000));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::phase::Phase;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of light events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Cycle thread started.
    ///
    /// Sets:
    /// - `light`: light id
    /// - `phase`: phase at start
    /// - `delay_ms`: duration drawn for the first phase
    CycleStarted,

    /// Light toggled.
    ///
    /// Sets:
    /// - `light`: light id
    /// - `phase`: phase reached
    /// - `delay_ms`: duration drawn for the phase just entered
    PhaseChanged,

    /// Cycle thread exited after cancellation.
    ///
    /// Sets:
    /// - `light`: light id
    /// - `phase`: phase at exit
    CycleStopped,
}

/// Light event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Id of the light that emitted the event.
    pub light: Option<u64>,
    /// Phase reached (or held) when the event was emitted.
    pub phase: Option<Phase>,
    /// Duration of the upcoming phase in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// Human-readable detail.
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            light: None,
            phase: None,
            delay_ms: None,
            reason: None,
        }
    }

    #[inline]
    pub fn with_light(mut self, id: u64) -> Self {
        self.light = Some(id);
        self
    }

    #[inline]
    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Attaches a delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    #[inline]
    pub fn is_phase_change(&self) -> bool {
        matches!(self.kind, EventKind::PhaseChanged)
    }
}
