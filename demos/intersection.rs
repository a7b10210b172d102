//! # Example: intersection
//!
//! Two independent lights guard an intersection; a few "vehicles" (threads)
//! wait for green before crossing.
//!
//! Demonstrates how to:
//! - Build lights with a [`Config`] and the built-in [`LogWriter`].
//! - Start the cycles with `simulate()`.
//! - Block vehicles in `wait_for_green()` from their own threads.
//! - Stop the lights, which releases anyone still waiting.
//!
//! ## Flow
//! ```text
//! TrafficLight #1, #2 ──► simulate()
//!     └─► CycleActor ─► toggle every 1..=3s ─► [phase-changed] light=#n phase=..
//! vehicle threads ──► wait_for_green() ──► cross
//! main ──► sleep ──► stop() both lights
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example intersection --features logging
//! ```

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use phaselight::{Config, CyclePolicy, LightError, LogWriter, Subscribe, TrafficLight};

fn main() -> Result<(), LightError> {
    let cfg = Config {
        cycle: CyclePolicy {
            min: Duration::from_secs(1),
            max: Duration::from_secs(3),
            step: Duration::from_secs(1),
        },
        ..Config::default()
    };
    let log: Arc<dyn Subscribe> = Arc::new(LogWriter::new());

    let lights: Vec<Arc<TrafficLight>> = (1..=2)
        .map(|id| {
            Arc::new(
                TrafficLight::builder(id)
                    .with_config(cfg.clone())
                    .with_subscriber(Arc::clone(&log))
                    .build(),
            )
        })
        .collect();
    for light in &lights {
        light.simulate()?;
    }

    let vehicles: Vec<_> = (0..4)
        .map(|n| {
            let light = Arc::clone(&lights[n % lights.len()]);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(700 * n as u64));
                println!("[vehicle {n}] waiting at light #{}", light.id());
                match light.wait_for_green() {
                    Ok(()) => println!("[vehicle {n}] crossing at light #{}", light.id()),
                    Err(e) => println!("[vehicle {n}] gave up: {}", e.as_message()),
                }
            })
        })
        .collect();

    thread::sleep(Duration::from_secs(8));
    for light in &lights {
        light.stop()?;
    }
    for (n, v) in vehicles.into_iter().enumerate() {
        if v.join().is_err() {
            eprintln!("[vehicle {n}] panicked");
        }
    }
    Ok(())
}
