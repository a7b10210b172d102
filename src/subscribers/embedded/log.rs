//! # LogWriter — simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [cycle-started] light=#1 phase=0 (red) next_in=7000ms
//! [phase-changed] light=#1 phase=1 (green) next_in=5000ms
//! [phase-changed] light=#1 phase=0 (red) next_in=8000ms
//! [cycle-stopped] light=#1 phase=0 (red)
//! ```

use crate::events::{Event, EventKind};
use crate::phase::Phase;
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Subscribe for LogWriter {
    fn on_event(&self, e: &Event) {
        println!("{}", render(e));
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}

fn render(e: &Event) -> String {
    let tag = match e.kind {
        EventKind::CycleStarted => "cycle-started",
        EventKind::PhaseChanged => "phase-changed",
        EventKind::CycleStopped => "cycle-stopped",
    };
    let light = e
        .light
        .map_or_else(|| "?".to_string(), |id| format!("#{id}"));
    let phase = e.phase.unwrap_or(Phase::Red);

    let mut line = format!(
        "[{tag}] light={light} phase={} ({phase})",
        phase.as_u8()
    );
    if let Some(ms) = e.delay_ms {
        line.push_str(&format!(" next_in={ms}ms"));
    }
    if let Some(reason) = e.reason.as_deref() {
        line.push_str(&format!(" reason={reason:?}"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_render_phase_change() {
        let ev = Event::new(EventKind::PhaseChanged)
            .with_light(4)
            .with_phase(Phase::Green)
            .with_delay(Duration::from_secs(6));
        assert_eq!(
            render(&ev),
            "[phase-changed] light=#4 phase=1 (green) next_in=6000ms"
        );
    }

    #[test]
    fn test_render_stop() {
        let ev = Event::new(EventKind::CycleStopped)
            .with_light(2)
            .with_phase(Phase::Red)
            .with_reason("cancelled");
        assert_eq!(
            render(&ev),
            "[cycle-stopped] light=#2 phase=0 (red) reason=\"cancelled\""
        );
    }
}
