//! # Waiter registry - current phase plus one mailbox per waiter.
//!
//! Each caller of `wait_for_green` gets its own single-slot
//! [`MessageQueue`]. The cycle publishes every new phase to all registered
//! mailboxes, so concurrent waiters never steal notifications from one another.
//!
//! ## Architecture
//! ```text
//! CycleActor ── toggle_and_publish() ──► WaiterRegistry
//!                                          ├─► phase.store(new)
//!                                          ├─► mailbox #1.replace(new) ──► waiter 1
//!                                          └─► mailbox #N.replace(new) ──► waiter N
//! ```
//!
//! ## Rules
//! - Toggle, publish, registration and close all happen under one lock: a waiter
//!   either registers before a toggle (and receives it) or after (and is seeded
//!   with the new phase).
//! - New mailboxes are seeded with the current phase.
//! - Dropping a [`Registration`] removes its mailbox.
//! - After `close()`, mailboxes are closed and registration is refused.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::phase::{AtomicPhase, Phase};
use crate::queue::MessageQueue;

struct Table {
    next_id: u64,
    mailboxes: HashMap<u64, Arc<MessageQueue<Phase>>>,
    closed: bool,
}

/// Phase state of one light, shared between the controller and its cycle thread.
pub(crate) struct WaiterRegistry {
    phase: AtomicPhase,
    table: Mutex<Table>,
}

impl WaiterRegistry {
    pub(crate) fn new(initial: Phase) -> Arc<Self> {
        Arc::new(Self {
            phase: AtomicPhase::new(initial),
            table: Mutex::new(Table {
                next_id: 0,
                mailboxes: HashMap::new(),
                closed: false,
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock-free read of the current phase.
    pub(crate) fn current(&self) -> Phase {
        self.phase.load()
    }

    /// Flips the phase and publishes it to every mailbox; returns the new phase.
    ///
    /// Returns only once every mailbox holds the new phase.
    pub(crate) fn toggle_and_publish(&self) -> Phase {
        let table = self.lock();
        let next = self.phase.load().toggled();
        self.phase.store(next);
        for mailbox in table.mailboxes.values() {
            // Closed only when the registry itself is closed.
            let _ = mailbox.replace(next);
        }
        next
    }

    /// Registers a new mailbox seeded with the current phase.
    ///
    /// Returns `None` once the registry is closed.
    pub(crate) fn register(self: &Arc<Self>) -> Option<Registration> {
        let mut table = self.lock();
        if table.closed {
            return None;
        }
        let mailbox = Arc::new(MessageQueue::bounded(1));
        let _ = mailbox.replace(self.phase.load());

        let id = table.next_id;
        table.next_id += 1;
        table.mailboxes.insert(id, Arc::clone(&mailbox));

        Some(Registration {
            id,
            mailbox,
            registry: Arc::clone(self),
        })
    }

    /// Closes every mailbox and refuses further registrations. Idempotent.
    pub(crate) fn close(&self) {
        let mut table = self.lock();
        table.closed = true;
        for mailbox in table.mailboxes.values() {
            mailbox.close();
        }
    }

    #[cfg(test)]
    pub(crate) fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Publishes `phase` as-is, without toggling.
    #[cfg(test)]
    pub(crate) fn publish(&self, phase: Phase) {
        let table = self.lock();
        self.phase.store(phase);
        for mailbox in table.mailboxes.values() {
            let _ = mailbox.replace(phase);
        }
    }

    /// Phases published but not yet taken by their waiters.
    #[cfg(test)]
    pub(crate) fn queued(&self) -> usize {
        self.lock().mailboxes.values().map(|m| m.len()).sum()
    }

    pub(crate) fn waiting(&self) -> usize {
        self.lock().mailboxes.len()
    }

    fn deregister(&self, id: u64) {
        self.lock().mailboxes.remove(&id);
    }
}

/// A registered waiter's mailbox; deregisters on drop.
pub(crate) struct Registration {
    id: u64,
    mailbox: Arc<MessageQueue<Phase>>,
    registry: Arc<WaiterRegistry>,
}

impl Registration {
    pub(crate) fn mailbox(&self) -> &MessageQueue<Phase> {
        &self.mailbox
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.registry.deregister(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueueError;

    #[test]
    fn test_register_seeds_current_phase() {
        let reg = WaiterRegistry::new(Phase::Red);
        let w = reg.register().unwrap();
        assert_eq!(w.mailbox().try_receive(), Ok(Phase::Red));
        assert_eq!(w.mailbox().try_receive(), Err(QueueError::Empty));
    }

    #[test]
    fn test_toggle_publishes_to_every_mailbox() {
        let reg = WaiterRegistry::new(Phase::Red);
        let a = reg.register().unwrap();
        let b = reg.register().unwrap();
        assert_eq!(reg.waiting(), 2);

        assert_eq!(reg.toggle_and_publish(), Phase::Green);
        assert_eq!(reg.current(), Phase::Green);
        // Seeded red was superseded.
        assert_eq!(a.mailbox().try_receive(), Ok(Phase::Green));
        assert_eq!(b.mailbox().try_receive(), Ok(Phase::Green));
        assert_eq!(a.mailbox().try_receive(), Err(QueueError::Empty));
    }

    #[test]
    fn test_drop_deregisters() {
        let reg = WaiterRegistry::new(Phase::Red);
        {
            let _w = reg.register().unwrap();
            assert_eq!(reg.waiting(), 1);
        }
        assert_eq!(reg.waiting(), 0);
        assert_eq!(reg.toggle_and_publish(), Phase::Green);
    }

    #[test]
    fn test_close_refuses_and_closes() {
        let reg = WaiterRegistry::new(Phase::Red);
        let w = reg.register().unwrap();
        w.mailbox().try_receive().unwrap();

        reg.close();
        assert!(reg.is_closed());
        assert!(reg.register().is_none());
        assert_eq!(w.mailbox().receive(), Err(QueueError::Closed));
    }
}
