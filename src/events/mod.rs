//! Light events.
//!
//! This module holds the event **data model** emitted by each light's cycle
//! thread and delivered to [`SubscriberSet`](crate::SubscriberSet).
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//!
//! ## Quick reference
//! - **Publisher**: `core::cycle::CycleActor` (start, every toggle, stop).
//! - **Consumers**: user [`Subscribe`](crate::Subscribe) implementations, e.g. `LogWriter`.

mod event;

pub use event::{Event, EventKind};
