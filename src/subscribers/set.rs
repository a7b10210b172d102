//! # SubscriberSet: fan-out over multiple subscribers
//!
//! [`SubscriberSet`] hands each [`Event`] to every subscriber in registration order.
//!
//! ## What it guarantees
//! - Per-subscriber order equals emit order.
//! - Panics inside subscribers are caught and logged (isolation): the
//!   remaining subscribers still see the event and the cycle keeps running.
//!
//! ## Diagram
//! ```text
//!    emit(&Event)
//!        ├──► S1.on_event()
//!        ├──► S2.on_event()
//!        └──► SN.on_event()
//! ```

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::events::Event;

use super::Subscribe;

/// Composite fan-out over subscribers.
#[derive(Clone, Default)]
pub struct SubscriberSet {
    subs: Vec<Arc<dyn Subscribe>>,
}

impl SubscriberSet {
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        Self { subs }
    }

    /// Delivers one event to all subscribers.
    pub fn emit(&self, event: &Event) {
        for sub in &self.subs {
            if let Err(panic_err) = catch_unwind(AssertUnwindSafe(|| sub.on_event(event))) {
                eprintln!(
                    "[phaselight] subscriber '{}' panicked: {:?}",
                    sub.name(),
                    panic_message(panic_err.as_ref())
                );
            }
        }
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subs.len()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown"
    }
}
