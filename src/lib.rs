//! # phaselight
//!
//! **phaselight** is a small coordination library: a blocking single-slot
//! notification queue and a simulated traffic light that cycles between red
//! and green on a background thread.
//!
//! Threads that need to cross an intersection call
//! [`TrafficLight::wait_for_green`] and block until the light turns green.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  ┌──────────────────────────────────────────────────────────────┐
//!  │ TrafficLight #id                                             │
//!  │  - lifecycle: Idle ─► Running{token, thread} ─► Stopped      │
//!  │  - WaiterRegistry: AtomicPhase + mailbox per waiter          │
//!  │  - SubscriberSet (diagnostics)                               │
//!  └──────┬───────────────────────────────────────────────────────┘
//!         │ simulate()
//!         ▼
//!  ┌──────────────────────┐  toggle_and_publish()   ┌───────────────────────┐
//!  │ CycleActor (thread)  │ ──────────────────────► │ MessageQueue<Phase>   │ ◄── waiter 1
//!  │ sleep_until / cancel │                         │ (one per waiter,      │ ◄── waiter 2
//!  └──────────┬───────────┘                         │  replace = clear+send)│ ◄── waiter N
//!             │ Event::PhaseChanged                 └───────────────────────┘
//!             ▼
//!       SubscriberSet ──► LogWriter / custom
//! ```
//!
//! ### Cycle
//! ```text
//! loop {
//!   ├─► wait hold = policy.next() (5..=8 whole seconds by default), cancellable
//!   ├─► phase = !phase, published to every waiter mailbox
//!   └─► emit PhaseChanged { light, phase }
//! }
//! ```
//!
//! ## Features
//! | Area              | Description                                             | Key types                              |
//! |-------------------|---------------------------------------------------------|----------------------------------------|
//! | **Queue**         | Blocking LIFO queue with clear/replace/close            | [`MessageQueue`]                       |
//! | **Controller**    | Phase cycle, blocking wait for green, lifecycle control | [`TrafficLight`], [`Phase`]            |
//! | **Policies**      | Randomised phase durations                              | [`CyclePolicy`]                        |
//! | **Subscriber API**| Hook into cycle events                                  | [`Subscribe`], [`Event`]               |
//! | **Errors**        | Typed queue and lifecycle errors                        | [`QueueError`], [`LightError`]         |
//! | **Configuration** | Per-light settings                                      | [`Config`]                             |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use std::time::Duration;
//! use phaselight::{Config, CyclePolicy, TrafficLight};
//!
//! let cfg = Config { cycle: CyclePolicy::millis(20, 40), ..Config::default() };
//! let light = Arc::new(TrafficLight::builder(1).with_config(cfg).build());
//! light.simulate()?;
//!
//! let car = {
//!     let light = Arc::clone(&light);
//!     thread::spawn(move || light.wait_for_green_timeout(Duration::from_secs(5)))
//! };
//! car.join().unwrap()?;
//!
//! light.stop()?;
//! # Ok::<(), phaselight::LightError>(())
//! ```
mod core;
mod error;
mod events;
mod phase;
mod policies;
mod queue;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{Config, TrafficLight, TrafficLightBuilder};
pub use error::{LightError, QueueError};
pub use events::{Event, EventKind};
pub use phase::{AtomicPhase, Phase};
pub use policies::CyclePolicy;
pub use queue::MessageQueue;
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
