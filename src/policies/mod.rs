//! Timing policies.
//!
//! ## Contents
//! - [`CyclePolicy`] how long each phase lasts (uniform over whole steps in `[min, max]`)
//!
//! ## Quick wiring
//! ```text
//! Config { cycle: CyclePolicy, .. }
//!      └─► core::cycle::CycleActor draws cycle.next() after every toggle
//! ```

mod cycle;

pub use cycle::CyclePolicy;
