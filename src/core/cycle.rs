//! # CycleActor: the background phase cycle of one light.
//!
//! Runs on a dedicated OS thread driving a single-threaded tokio runtime, so
//! the wait for the next toggle can be raced against cancellation.
//!
//! ## Loop
//! ```text
//! hold = policy.next(); last = now
//! publish CycleStarted
//! loop {
//!   ├─► select! { token.cancelled() → break, sleep_until(last + hold) }
//!   ├─► registry.toggle_and_publish()   (phase flipped, every mailbox updated)
//!   ├─► last = now
//!   ├─► hold = policy.next()
//!   └─► publish PhaseChanged { light, phase, delay = hold }
//! }
//! publish CycleStopped
//! ```
//!
//! ## Rules
//! - Toggles strictly alternate; each happens no earlier than `hold` after the previous one.
//! - A new phase is visible to waiters before its `PhaseChanged` event is emitted.
//! - Cancellation is observed while waiting, never halfway through a toggle.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tokio::time::{self, Instant};
use tokio::{runtime, select};
use tokio_util::sync::CancellationToken;

use crate::{
    core::waiters::WaiterRegistry,
    error::LightError,
    events::{Event, EventKind},
    policies::CyclePolicy,
    subscribers::SubscriberSet,
};

/// Deadline used when `last + hold` does not fit in an `Instant` (about 30 years).
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Drives the phase cycle of a single light.
pub(crate) struct CycleActor {
    pub id: u64,
    pub registry: Arc<WaiterRegistry>,
    pub policy: CyclePolicy,
    pub subs: SubscriberSet,
}

impl CycleActor {
    /// Starts the cycle on a new thread named `thread_name`.
    ///
    /// The timer runtime is built before the thread is spawned so both failure
    /// modes surface here as [`LightError::Spawn`].
    pub(crate) fn spawn(
        self,
        thread_name: String,
        token: CancellationToken,
    ) -> Result<thread::JoinHandle<()>, LightError> {
        let rt = runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|e| LightError::Spawn {
                reason: e.to_string(),
            })?;

        thread::Builder::new()
            .name(thread_name)
            .spawn(move || rt.block_on(self.run(token)))
            .map_err(|e| LightError::Spawn {
                reason: e.to_string(),
            })
    }

    /// Runs until `token` is cancelled.
    pub(crate) async fn run(self, token: CancellationToken) {
        let mut hold = self.policy.next();
        let mut last = Instant::now();
        self.subs.emit(
            &Event::new(EventKind::CycleStarted)
                .with_light(self.id)
                .with_phase(self.registry.current())
                .with_delay(hold),
        );

        loop {
            select! {
                biased;
                _ = token.cancelled() => break,
                _ = time::sleep_until(deadline(last, hold)) => {}
            }

            let phase = self.registry.toggle_and_publish();
            last = Instant::now();
            hold = self.policy.next();

            self.subs.emit(
                &Event::new(EventKind::PhaseChanged)
                    .with_light(self.id)
                    .with_phase(phase)
                    .with_delay(hold),
            );
        }

        self.subs.emit(
            &Event::new(EventKind::CycleStopped)
                .with_light(self.id)
                .with_phase(self.registry.current())
                .with_reason("cancelled"),
        );
    }
}

fn deadline(last: Instant, hold: Duration) -> Instant {
    last.checked_add(hold).unwrap_or_else(|| last + FAR_FUTURE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::Phase;
    use crate::subscribers::Subscribe;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Event>>);

    impl Subscribe for Recorder {
        fn on_event(&self, ev: &Event) {
            self.0.lock().unwrap().push(ev.clone());
        }
    }

    fn actor(policy: CyclePolicy, rec: &Arc<Recorder>) -> (CycleActor, Arc<WaiterRegistry>) {
        let registry = WaiterRegistry::new(Phase::Red);
        let actor = CycleActor {
            id: 11,
            registry: Arc::clone(&registry),
            policy,
            subs: SubscriberSet::new(vec![rec.clone() as Arc<dyn Subscribe>]),
        };
        (actor, registry)
    }

    #[test]
    fn test_cycle_toggles_then_stops_on_cancel() {
        let rec = Arc::new(Recorder::default());
        let (actor, registry) = actor(CyclePolicy::fixed(Duration::from_millis(20)), &rec);
        let token = CancellationToken::new();
        let handle = actor.spawn("cycle-test".into(), token.clone()).unwrap();

        thread::sleep(Duration::from_millis(150));
        token.cancel();
        handle.join().unwrap();

        let events = rec.0.lock().unwrap();
        assert_eq!(events.first().map(|e| e.kind), Some(EventKind::CycleStarted));
        assert_eq!(events.last().map(|e| e.kind), Some(EventKind::CycleStopped));

        let phases: Vec<Phase> = events
            .iter()
            .filter(|e| e.is_phase_change())
            .filter_map(|e| e.phase)
            .collect();
        assert!(phases.len() >= 2, "only {} toggles", phases.len());
        for (i, p) in phases.iter().enumerate() {
            let expected = if i % 2 == 0 { Phase::Green } else { Phase::Red };
            assert_eq!(*p, expected, "toggle {i}");
        }
        assert!(events.iter().all(|e| e.light == Some(11)));
        assert_eq!(registry.current(), *phases.last().unwrap());
    }

    #[test]
    fn test_cancel_before_first_toggle() {
        let rec = Arc::new(Recorder::default());
        let (actor, registry) = actor(CyclePolicy::fixed(Duration::from_secs(60)), &rec);
        let token = CancellationToken::new();
        let handle = actor.spawn("cycle-idle".into(), token.clone()).unwrap();

        thread::sleep(Duration::from_millis(20));
        token.cancel();
        handle.join().unwrap();

        assert_eq!(registry.current(), Phase::Red);
        let kinds: Vec<EventKind> = rec.0.lock().unwrap().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::CycleStarted, EventKind::CycleStopped]);
    }

    #[test]
    fn test_unrepresentable_hold_still_cancels() {
        let rec = Arc::new(Recorder::default());
        let (actor, registry) = actor(CyclePolicy::fixed(Duration::MAX), &rec);
        let token = CancellationToken::new();
        let handle = actor.spawn("cycle-max".into(), token.clone()).unwrap();

        thread::sleep(Duration::from_millis(50));
        token.cancel();
        handle.join().unwrap();

        assert_eq!(registry.current(), Phase::Red);
        let events = rec.0.lock().unwrap();
        assert_eq!(events.first().and_then(|e| e.delay_ms), Some(u32::MAX));
        assert_eq!(events.last().map(|e| e.kind), Some(EventKind::CycleStopped));
    }
}
