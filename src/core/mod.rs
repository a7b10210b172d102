//! Light core: controller, cycle and waiters.
//!
//! The only public API from this module is [`TrafficLight`] (with its builder
//! and [`Config`]).
//!
//! Internal modules:
//! - [`light`]: public controller, lifecycle and `wait_for_green`;
//! - [`cycle`]: background cycle actor, cancellable;
//! - [`waiters`]: current phase plus one mailbox per waiting thread;
//! - [`builder`]: light construction;
//! - [`config`]: settings with defaults.

mod builder;
mod config;
mod cycle;
mod light;
mod waiters;

pub use builder::TrafficLightBuilder;
pub use config::Config;
pub use light::TrafficLight;
