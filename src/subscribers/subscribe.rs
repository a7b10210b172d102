//! # Core subscriber trait
//!
//! `Subscribe` is the extension point for plugging custom event handlers into a
//! light. Subscribers are called synchronously on the light's cycle thread,
//! right after the phase was published to waiters.
//!
//! ## Contract
//! - Keep `on_event` short; a slow subscriber delays the next toggle check.
//! - Panics are caught by [`SubscriberSet`](crate::SubscriberSet) and reported on stderr.
//! - A subscriber may call `stop()` on (or drop) the light it observes: the
//!   cycle is cancelled without being joined and exits once `on_event` returns.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use phaselight::{Event, Subscribe};
//!
//! #[derive(Default)]
//! struct Counter(AtomicUsize);
//!
//! impl Subscribe for Counter {
//!     fn on_event(&self, ev: &Event) {
//!         if ev.is_phase_change() {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!     fn name(&self) -> &'static str { "counter" }
//! }
//! ```

use crate::events::Event;

/// Contract for event subscribers.
pub trait Subscribe: Send + Sync + 'static {
    /// Handle a single event for this subscriber.
    fn on_event(&self, event: &Event);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
