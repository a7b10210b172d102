//! # Traffic light phase.
//!
//! [`Phase`] is the signal a light shows: red or green. It is a small `Copy`
//! value with a stable numeric form (`Red = 0`, `Green = 1`) used by diagnostics.
//!
//! [`AtomicPhase`] stores the current phase so any thread can read it without
//! taking a lock while the cycle thread writes it.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Signal state of a traffic light.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Stop. Initial phase of every light.
    #[default]
    Red = 0,
    /// Go.
    Green = 1,
}

impl Phase {
    /// Returns the opposite phase.
    #[inline]
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Phase::Red => Phase::Green,
            Phase::Green => Phase::Red,
        }
    }

    /// Numeric value printed in diagnostics.
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Lowercase name (`"red"` / `"green"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Red => "red",
            Phase::Green => "green",
        }
    }

    #[inline]
    pub fn is_green(self) -> bool {
        matches!(self, Phase::Green)
    }

    fn from_u8(raw: u8) -> Self {
        if raw == Phase::Green as u8 {
            Phase::Green
        } else {
            Phase::Red
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lock-free cell holding a [`Phase`].
///
/// Writes use `Release`, reads use `Acquire`: a reader that observes a new
/// phase also observes everything the writer did before storing it.
#[derive(Debug)]
pub struct AtomicPhase(AtomicU8);

impl AtomicPhase {
    pub fn new(phase: Phase) -> Self {
        Self(AtomicU8::new(phase.as_u8()))
    }

    #[inline]
    pub fn load(&self) -> Phase {
        Phase::from_u8(self.0.load(Ordering::Acquire))
    }

    #[inline]
    pub fn store(&self, phase: Phase) {
        self.0.store(phase.as_u8(), Ordering::Release);
    }
}

impl Default for AtomicPhase {
    fn default() -> Self {
        Self::new(Phase::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_alternates() {
        assert_eq!(Phase::Red.toggled(), Phase::Green);
        assert_eq!(Phase::Green.toggled(), Phase::Red);
        assert_eq!(Phase::Red.toggled().toggled(), Phase::Red);
    }

    #[test]
    fn test_numeric_values() {
        assert_eq!(Phase::Red.as_u8(), 0);
        assert_eq!(Phase::Green.as_u8(), 1);
        assert_eq!(Phase::default(), Phase::Red);
    }

    #[test]
    fn test_atomic_phase_store_load() {
        let cell = AtomicPhase::default();
        assert_eq!(cell.load(), Phase::Red);
        cell.store(Phase::Green);
        assert_eq!(cell.load(), Phase::Green);
        cell.store(Phase::Red);
        assert_eq!(cell.load(), Phase::Red);
    }
}
