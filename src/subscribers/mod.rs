//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out
//! and the built-in [`LogWriter`].
//!
//! ## Architecture
//! ```text
//! CycleActor ── emit(&Event) ──► SubscriberSet
//!                                    ├──► LogWriter
//!                                    └──► Custom ...
//! ```

#[cfg_attr(not(feature = "logging"), allow(dead_code, unused_imports))]
mod embedded;
mod set;
mod subscribe;

pub use set::SubscriberSet;
pub use subscribe::Subscribe;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
