//! # Blocking notification queue.
//!
//! [`MessageQueue`] hands values from a producing thread to consuming threads.
//! It is a lock-protected stack: the most recently sent value is received
//! first, since only the latest notification matters.
//!
//! ## Rules
//! - **One lock**: every read and write of the container happens under the same mutex.
//! - **No missed wakeups**: receivers wait on a condvar tied to that mutex and
//!   re-check the non-empty predicate after each wakeup.
//! - **LIFO**: `receive()` moves out the newest value.
//! - **Close drains**: after `close()`, pending values are still delivered; then
//!   receivers get [`QueueError::Closed`].
//!
//! ## Single-slot use
//! ```text
//! producer: replace(v)  ── clear + push under one lock ──► [ v ]
//! consumer: receive()   ◄── newest value, or block until one arrives
//! ```
//! [`MessageQueue::replace`] is the mailbox publish used by the traffic light:
//! no receiver can ever observe a superseded value between the clear and the push.
//!
//! ## Example
//! ```rust
//! use phaselight::MessageQueue;
//!
//! let q = MessageQueue::new();
//! q.send(1).unwrap();
//! q.send(2).unwrap();
//! assert_eq!(q.receive(), Ok(2));
//! assert_eq!(q.receive(), Ok(1));
//! ```

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::error::QueueError;

struct State<T> {
    items: Vec<T>,
    closed: bool,
}

/// Thread-safe blocking LIFO queue.
///
/// Share it behind an `Arc`. Unbounded by default; see [`MessageQueue::bounded`].
pub struct MessageQueue<T> {
    state: Mutex<State<T>>,
    available: Condvar,
    capacity: Option<usize>,
}

impl<T> MessageQueue<T> {
    /// Creates an unbounded queue.
    pub fn new() -> Self {
        Self::with_limit(None)
    }

    /// Creates a queue holding at most `capacity` values (minimum 1).
    ///
    /// `send()` on a full queue returns [`QueueError::Full`].
    pub fn bounded(capacity: usize) -> Self {
        Self::with_limit(Some(capacity.max(1)))
    }

    fn with_limit(capacity: Option<usize>) -> Self {
        Self {
            state: Mutex::new(State {
                items: Vec::new(),
                closed: false,
            }),
            available: Condvar::new(),
            capacity,
        }
    }

    // The container only holds plain values, so a panic while the lock was
    // held cannot leave it half-updated.
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pushes a value and wakes one waiting receiver.
    ///
    /// Never blocks beyond the lock hold.
    pub fn send(&self, value: T) -> Result<(), QueueError> {
        let mut state = self.lock();
        if state.closed {
            return Err(QueueError::Closed);
        }
        if let Some(capacity) = self.capacity {
            if state.items.len() >= capacity {
                return Err(QueueError::Full { capacity });
            }
        }
        state.items.push(value);
        drop(state);
        self.available.notify_one();
        Ok(())
    }

    /// Discards anything pending and pushes `value`, under one lock hold.
    ///
    /// Afterwards the queue holds exactly `value`. Wakes one waiting receiver.
    pub fn replace(&self, value: T) -> Result<(), QueueError> {
        let mut state = self.lock();
        if state.closed {
            return Err(QueueError::Closed);
        }
        state.items.clear();
        state.items.push(value);
        drop(state);
        self.available.notify_one();
        Ok(())
    }

    /// Blocks until a value is available, then removes and returns the newest one.
    ///
    /// Returns [`QueueError::Closed`] once the queue is closed and drained.
    pub fn receive(&self) -> Result<T, QueueError> {
        let mut state = self.lock();
        loop {
            if let Some(value) = state.items.pop() {
                return Ok(value);
            }
            if state.closed {
                return Err(QueueError::Closed);
            }
            state = self
                .available
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Like [`receive`](Self::receive), but gives up after `timeout`.
    ///
    /// A timeout too large to be represented as a deadline waits without bound.
    pub fn receive_timeout(&self, timeout: Duration) -> Result<T, QueueError> {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return self.receive();
        };
        let mut state = self.lock();
        loop {
            if let Some(value) = state.items.pop() {
                return Ok(value);
            }
            if state.closed {
                return Err(QueueError::Closed);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(QueueError::Timeout { timeout });
            }
            state = self
                .available
                .wait_timeout(state, remaining)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }

    /// Removes the newest value without blocking.
    pub fn try_receive(&self) -> Result<T, QueueError> {
        let mut state = self.lock();
        match state.items.pop() {
            Some(value) => Ok(value),
            None if state.closed => Err(QueueError::Closed),
            None => Err(QueueError::Empty),
        }
    }

    /// Empties the queue, returning how many values were discarded.
    pub fn clear(&self) -> usize {
        let mut state = self.lock();
        let dropped = state.items.len();
        state.items.clear();
        dropped
    }

    /// Closes the queue and wakes every waiting receiver.
    ///
    /// Further sends fail with [`QueueError::Closed`]. Idempotent.
    pub fn close(&self) {
        self.lock().closed = true;
        self.available.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    /// Capacity bound, `None` when unbounded.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }
}

impl<T> Default for MessageQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for MessageQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("MessageQueue")
            .field("len", &state.items.len())
            .field("closed", &state.closed)
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Phase;
    use std::sync::Arc;
    use std::sync::mpsc;
    use std::thread;

    const SHORT: Duration = Duration::from_millis(50);

    #[test]
    fn test_receive_is_lifo() {
        let q = MessageQueue::new();
        for i in 0..3 {
            q.send(i).unwrap();
        }
        assert_eq!(q.receive(), Ok(2));
        assert_eq!(q.receive(), Ok(1));
        assert_eq!(q.receive(), Ok(0));
        assert!(q.is_empty());
    }

    #[test]
    fn test_single_producer_consumer_receives_each_value_once() {
        let q = Arc::new(MessageQueue::new());
        let consumer = {
            let q = Arc::clone(&q);
            thread::spawn(move || {
                let mut got = Vec::new();
                for _ in 0..100 {
                    got.push(q.receive().unwrap());
                }
                got
            })
        };
        for i in 0..100u32 {
            q.send(i).unwrap();
        }

        let mut got = consumer.join().unwrap();
        got.sort_unstable();
        assert_eq!(got, (0..100).collect::<Vec<_>>());
        assert!(q.is_empty());
    }

    #[test]
    fn test_receive_blocks_until_send() {
        let q = Arc::new(MessageQueue::new());
        let (tx, rx) = mpsc::channel();
        let consumer = {
            let q = Arc::clone(&q);
            thread::spawn(move || {
                let v = q.receive().unwrap();
                tx.send(v).unwrap();
            })
        };

        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
        q.send(Phase::Green).unwrap();
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), Phase::Green);
        consumer.join().unwrap();
    }

    #[test]
    fn test_receive_timeout_on_empty_queue() {
        let q: MessageQueue<u8> = MessageQueue::new();
        let started = Instant::now();
        assert_eq!(q.receive_timeout(SHORT), Err(QueueError::Timeout { timeout: SHORT }));
        assert!(started.elapsed() >= SHORT);
    }

    #[test]
    fn test_receive_timeout_with_unrepresentable_deadline() {
        let q = Arc::new(MessageQueue::new());
        q.send(7u8).unwrap();
        assert_eq!(q.receive_timeout(Duration::MAX), Ok(7));

        let waiter = {
            let q = Arc::clone(&q);
            thread::spawn(move || q.receive_timeout(Duration::MAX))
        };
        thread::sleep(SHORT);
        q.send(8).unwrap();
        assert_eq!(waiter.join().unwrap(), Ok(8));
    }

    #[test]
    fn test_clear_then_receive_waits_for_new_send() {
        let q = MessageQueue::new();
        q.send(Phase::Red).unwrap();
        assert_eq!(q.clear(), 1);
        assert!(matches!(q.receive_timeout(SHORT), Err(QueueError::Timeout { .. })));
        q.send(Phase::Green).unwrap();
        assert_eq!(q.receive_timeout(SHORT), Ok(Phase::Green));
    }

    #[test]
    fn test_red_clear_green_yields_green() {
        let q = MessageQueue::new();
        q.send(Phase::Red).unwrap();
        q.clear();
        q.send(Phase::Green).unwrap();
        assert_eq!(q.receive(), Ok(Phase::Green));
        assert_eq!(q.try_receive(), Err(QueueError::Empty));
    }

    #[test]
    fn test_replace_keeps_only_latest() {
        let q = MessageQueue::bounded(1);
        q.replace(Phase::Red).unwrap();
        q.replace(Phase::Green).unwrap();
        assert_eq!(q.len(), 1);
        assert_eq!(q.receive(), Ok(Phase::Green));
    }

    #[test]
    fn test_bounded_full_keeps_contents() {
        let q = MessageQueue::bounded(2);
        q.send('a').unwrap();
        q.send('b').unwrap();
        assert_eq!(q.send('c'), Err(QueueError::Full { capacity: 2 }));
        assert_eq!(q.len(), 2);
        assert_eq!(q.receive(), Ok('b'));
        q.send('c').unwrap();
        assert_eq!(q.receive(), Ok('c'));
    }

    #[test]
    fn test_bounded_zero_is_clamped() {
        let q: MessageQueue<()> = MessageQueue::bounded(0);
        assert_eq!(q.capacity(), Some(1));
        assert_eq!(MessageQueue::<()>::new().capacity(), None);
    }

    #[test]
    fn test_close_wakes_receiver_and_drains_first() {
        let q = Arc::new(MessageQueue::<u8>::new());
        let waiter = {
            let q = Arc::clone(&q);
            thread::spawn(move || q.receive())
        };
        thread::sleep(SHORT);
        q.close();
        assert_eq!(waiter.join().unwrap(), Err(QueueError::Closed));

        let q = MessageQueue::new();
        q.send(5).unwrap();
        q.close();
        assert_eq!(q.send(6), Err(QueueError::Closed));
        assert_eq!(q.receive(), Ok(5));
        assert_eq!(q.receive(), Err(QueueError::Closed));
        assert_eq!(q.try_receive(), Err(QueueError::Closed));
    }

    #[test]
    fn test_concurrent_receivers_take_distinct_values() {
        let q = Arc::new(MessageQueue::new());
        let receivers: Vec<_> = (0..4)
            .map(|_| {
                let q = Arc::clone(&q);
                thread::spawn(move || q.receive().unwrap())
            })
            .collect();
        for i in 0..4 {
            q.send(i).unwrap();
        }

        let mut got: Vec<i32> = receivers.into_iter().map(|h| h.join().unwrap()).collect();
        got.sort_unstable();
        assert_eq!(got, vec![0, 1, 2, 3]);
    }
}
