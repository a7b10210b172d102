//! Error types used by the notification queue and the traffic light.
//!
//! This module defines two error enums:
//!
//! - [`QueueError`] — outcomes of [`MessageQueue`](crate::MessageQueue) operations that could not complete.
//! - [`LightError`] — lifecycle and waiting failures of a [`TrafficLight`](crate::TrafficLight).
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by the notification queue.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// A bounded queue is at capacity; the value was not enqueued.
    #[error("queue full (capacity {capacity})")]
    Full {
        /// Configured capacity of the queue.
        capacity: usize,
    },

    /// Nothing pending (non-blocking receive only).
    #[error("queue empty")]
    Empty,

    /// The queue was closed and holds no more values.
    #[error("queue closed")]
    Closed,

    /// A bounded wait elapsed before any value arrived.
    #[error("receive timed out after {timeout:?}")]
    Timeout {
        /// The wait that elapsed.
        timeout: Duration,
    },
}

impl QueueError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use phaselight::QueueError;
    ///
    /// let err = QueueError::Full { capacity: 4 };
    /// assert_eq!(err.as_label(), "queue_full");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            QueueError::Full { .. } => "queue_full",
            QueueError::Empty => "queue_empty",
            QueueError::Closed => "queue_closed",
            QueueError::Timeout { .. } => "queue_timeout",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            QueueError::Full { capacity } => format!("full: capacity={capacity}"),
            QueueError::Empty => "nothing pending".to_string(),
            QueueError::Closed => "closed".to_string(),
            QueueError::Timeout { timeout } => format!("timeout: {timeout:?}"),
        }
    }
}

/// # Errors produced by a traffic light.
///
/// Lifecycle misuse (`AlreadyRunning`, `NotStarted`, `AlreadyStopped`) is
/// reported instead of silently spawning duplicate cycles or ignoring a stop.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LightError {
    /// `simulate()` was called while the cycle is already running.
    #[error("light #{id} is already running")]
    AlreadyRunning {
        /// Light id.
        id: u64,
    },

    /// `stop()` was called before `simulate()`.
    #[error("light #{id} was never started")]
    NotStarted {
        /// Light id.
        id: u64,
    },

    /// The light has already been stopped and cannot be used again.
    #[error("light #{id} is already stopped")]
    AlreadyStopped {
        /// Light id.
        id: u64,
    },

    /// The light stopped while a caller was waiting for green.
    #[error("light #{id} stopped while waiting for green")]
    Stopped {
        /// Light id.
        id: u64,
    },

    /// No green was delivered within the caller's deadline.
    #[error("no green within {timeout:?}")]
    Timeout {
        /// The wait that elapsed.
        timeout: Duration,
    },

    /// The cycle thread or its timer driver could not be created.
    #[error("failed to spawn cycle: {reason}")]
    Spawn {
        /// The underlying I/O error message.
        reason: String,
    },

    /// The cycle thread panicked; observed when joining it.
    #[error("cycle of light #{id} panicked")]
    CyclePanicked {
        /// Light id.
        id: u64,
    },
}

impl LightError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use phaselight::LightError;
    ///
    /// let err = LightError::NotStarted { id: 7 };
    /// assert_eq!(err.as_label(), "light_not_started");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            LightError::AlreadyRunning { .. } => "light_already_running",
            LightError::NotStarted { .. } => "light_not_started",
            LightError::AlreadyStopped { .. } => "light_already_stopped",
            LightError::Stopped { .. } => "light_stopped",
            LightError::Timeout { .. } => "light_timeout",
            LightError::Spawn { .. } => "light_spawn_failed",
            LightError::CyclePanicked { .. } => "light_cycle_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            LightError::AlreadyRunning { id } => format!("light=#{id} already running"),
            LightError::NotStarted { id } => format!("light=#{id} not started"),
            LightError::AlreadyStopped { id } => format!("light=#{id} already stopped"),
            LightError::Stopped { id } => format!("light=#{id} stopped during wait"),
            LightError::Timeout { timeout } => format!("timeout: {timeout:?}"),
            LightError::Spawn { reason } => format!("spawn: {reason}"),
            LightError::CyclePanicked { id } => format!("light=#{id} cycle panicked"),
        }
    }

    /// Indicates whether the error ends the light's usefulness for the caller.
    ///
    /// Returns `true` for [`LightError::Stopped`], [`LightError::AlreadyStopped`]
    /// and [`LightError::CyclePanicked`].
    ///
    /// # Example
    /// ```
    /// use phaselight::LightError;
    /// use std::time::Duration;
    ///
    /// assert!(LightError::Stopped { id: 1 }.is_terminal());
    /// assert!(!LightError::Timeout { timeout: Duration::from_secs(1) }.is_terminal());
    /// ```
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LightError::Stopped { .. }
                | LightError::AlreadyStopped { .. }
                | LightError::CyclePanicked { .. }
        )
    }
}
