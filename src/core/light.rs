//! # TrafficLight: phase controller with a cancellable background cycle.
//!
//! A [`TrafficLight`] starts red. [`simulate`](TrafficLight::simulate) spawns its
//! cycle thread, which alternates red and green on randomised durations.
//! Threads block in [`wait_for_green`](TrafficLight::wait_for_green) until the
//! light turns (or already is) green.
//!
//! ## Lifecycle
//! ```text
//!            simulate()              stop() / drop
//!   Idle ───────────────► Running ───────────────────► Stopped
//!    │                      │ simulate() → AlreadyRunning  │ simulate()/stop() → AlreadyStopped
//!    └─ stop() → NotStarted                                └ wait_for_green() → AlreadyStopped
//! ```
//!
//! ## Waiting
//! ```text
//! wait_for_green()
//!   ├─► register mailbox (seeded with the current phase)
//!   └─► loop {
//!         pause(wait_poll)
//!         mailbox.receive() ─► Green  → return Ok
//!                           ─► Red    → continue
//!                           ─► Closed → Err(Stopped)
//!       }
//! ```
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use phaselight::{Config, CyclePolicy, Phase, TrafficLight};
//!
//! let mut cfg = Config::default();
//! cfg.cycle = CyclePolicy::millis(10, 20);
//!
//! let light = TrafficLight::builder(1).with_config(cfg).build();
//! assert_eq!(light.current_phase(), Phase::Red);
//!
//! light.simulate().unwrap();
//! light.wait_for_green_timeout(Duration::from_secs(5)).unwrap();
//! light.stop().unwrap();
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::{
    core::{builder::TrafficLightBuilder, config::Config, cycle::CycleActor, waiters::WaiterRegistry},
    error::{LightError, QueueError},
    phase::Phase,
    subscribers::SubscriberSet,
};

enum Lifecycle {
    Idle,
    Running {
        token: CancellationToken,
        handle: JoinHandle<()>,
    },
    Stopped,
}

/// Simulated traffic light.
///
/// Share it between threads with an `Arc`; every method takes `&self`.
pub struct TrafficLight {
    id: u64,
    cfg: Config,
    registry: Arc<WaiterRegistry>,
    subs: SubscriberSet,
    lifecycle: Mutex<Lifecycle>,
}

impl TrafficLight {
    /// Creates a red light with default configuration and no subscribers.
    pub fn new(id: u64) -> Self {
        Self::builder(id).build()
    }

    /// Starts building a light with the given id.
    pub fn builder(id: u64) -> TrafficLightBuilder {
        TrafficLightBuilder::new(id)
    }

    pub(crate) fn from_parts(id: u64, cfg: Config, subs: SubscriberSet) -> Self {
        Self {
            id,
            cfg,
            registry: WaiterRegistry::new(Phase::Red),
            subs,
            lifecycle: Mutex::new(Lifecycle::Idle),
        }
    }

    fn lock_lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Light id, as supplied at construction.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Current phase. Never blocks.
    pub fn current_phase(&self) -> Phase {
        self.registry.current()
    }

    /// True between a successful `simulate()` and `stop()`.
    pub fn is_running(&self) -> bool {
        matches!(*self.lock_lifecycle(), Lifecycle::Running { .. })
    }

    /// Number of threads currently inside `wait_for_green`.
    pub fn waiting(&self) -> usize {
        self.registry.waiting()
    }

    /// Starts the background cycle and returns immediately.
    ///
    /// ### Errors
    /// - [`LightError::AlreadyRunning`] if the cycle is already running
    /// - [`LightError::AlreadyStopped`] after `stop()`
    /// - [`LightError::Spawn`] if the thread or its timer could not be created
    pub fn simulate(&self) -> Result<(), LightError> {
        let mut state = self.lock_lifecycle();
        match *state {
            Lifecycle::Running { .. } => return Err(LightError::AlreadyRunning { id: self.id }),
            Lifecycle::Stopped => return Err(LightError::AlreadyStopped { id: self.id }),
            Lifecycle::Idle => {}
        }

        let token = CancellationToken::new();
        let actor = CycleActor {
            id: self.id,
            registry: Arc::clone(&self.registry),
            policy: self.cfg.cycle,
            subs: self.subs.clone(),
        };
        let handle = actor.spawn(self.cfg.thread_name_for(self.id), token.clone())?;
        *state = Lifecycle::Running { token, handle };
        Ok(())
    }

    /// Cancels the cycle, joins its thread and releases every waiter.
    ///
    /// Waiters blocked in `wait_for_green` return [`LightError::Stopped`].
    /// Called from the cycle thread itself (i.e. from a subscriber), the cycle
    /// is cancelled but not joined; it exits once the subscriber returns.
    ///
    /// ### Errors
    /// - [`LightError::NotStarted`] if `simulate()` was never called (the light stays usable)
    /// - [`LightError::AlreadyStopped`] on a second call
    /// - [`LightError::CyclePanicked`] if the cycle thread panicked
    pub fn stop(&self) -> Result<(), LightError> {
        let mut state = self.lock_lifecycle();
        match std::mem::replace(&mut *state, Lifecycle::Stopped) {
            Lifecycle::Idle => {
                *state = Lifecycle::Idle;
                Err(LightError::NotStarted { id: self.id })
            }
            Lifecycle::Stopped => Err(LightError::AlreadyStopped { id: self.id }),
            Lifecycle::Running { token, handle } => {
                drop(state);
                token.cancel();
                let joined = join_unless_current(handle);
                self.registry.close();
                joined.map_err(|_| LightError::CyclePanicked { id: self.id })
            }
        }
    }

    /// Blocks until the light is green.
    ///
    /// Returns immediately (after one `wait_poll` pause) if the light is
    /// already green; otherwise waits for the next green, ignoring reds.
    ///
    /// ### Errors
    /// - [`LightError::Stopped`] if the light is stopped while waiting
    /// - [`LightError::AlreadyStopped`] if called on a stopped light
    pub fn wait_for_green(&self) -> Result<(), LightError> {
        self.wait_green(None)
    }

    /// Like [`wait_for_green`](Self::wait_for_green), giving up after `timeout`
    /// with [`LightError::Timeout`].
    pub fn wait_for_green_timeout(&self, timeout: Duration) -> Result<(), LightError> {
        self.wait_green(Some(timeout))
    }

    fn wait_green(&self, timeout: Option<Duration>) -> Result<(), LightError> {
        // Unrepresentable deadlines mean "no deadline".
        let deadline = timeout.and_then(|t| Instant::now().checked_add(t));
        let waiter = self
            .registry
            .register()
            .ok_or(LightError::AlreadyStopped { id: self.id })?;

        loop {
            if let Some(pause) = self.cfg.wait_pause() {
                thread::sleep(pause);
            }
            let received = match deadline {
                None => waiter.mailbox().receive(),
                Some(deadline) => waiter
                    .mailbox()
                    .receive_timeout(deadline.saturating_duration_since(Instant::now())),
            };

            match received {
                Ok(Phase::Green) => return Ok(()),
                Ok(Phase::Red) => continue,
                Err(QueueError::Timeout { .. }) => {
                    return Err(LightError::Timeout {
                        timeout: timeout.unwrap_or_default(),
                    });
                }
                Err(_) => return Err(LightError::Stopped { id: self.id }),
            }
        }
    }
}

impl Drop for TrafficLight {
    fn drop(&mut self) {
        let state = std::mem::replace(
            self.lifecycle.get_mut().unwrap_or_else(PoisonError::into_inner),
            Lifecycle::Stopped,
        );
        if let Lifecycle::Running { token, handle } = state {
            token.cancel();
            if join_unless_current(handle).is_err() {
                eprintln!("[phaselight] cycle of light #{} panicked", self.id);
            }
        }
        self.registry.close();
    }
}

/// Joins `handle`, unless it is the calling thread: a thread cannot join itself.
fn join_unless_current(handle: JoinHandle<()>) -> thread::Result<()> {
    if handle.thread().id() == thread::current().id() {
        return Ok(());
    }
    handle.join()
}

impl std::fmt::Debug for TrafficLight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrafficLight")
            .field("id", &self.id)
            .field("phase", &self.current_phase())
            .field("running", &self.is_running())
            .finish()
    }
}
