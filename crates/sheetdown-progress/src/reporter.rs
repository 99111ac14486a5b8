//! Foreground handle of the progress reporter

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use crate::config::{ProgressConfig, SimulationConfig};
use crate::console::{Command, Console};
use crate::simulation::Simulation;
use crate::state::{clamp_percent, ProgressState};
use crate::MAX_SIMULATED_PERCENT;

/// Thread-safe console progress reporter
///
/// Operations never fail: percentages are clamped and a console that has
/// already shut down is silently ignored.
pub struct ProgressReporter {
    tx: Sender<Command>,
    console: Mutex<Option<JoinHandle<()>>>,
    simulation: Mutex<Option<Simulation>>,
    config: SimulationConfig,
    next_id: AtomicU64,
}

impl ProgressReporter {
    /// Reporter writing to stdout with default pacing
    pub fn new() -> Self {
        Self::with_writer(io::stdout(), ProgressConfig::default())
    }

    /// Reporter writing to an arbitrary sink
    pub fn with_writer<W: Write + Send + 'static>(writer: W, config: ProgressConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        let console = Console::new(writer, config.bar_width);
        let handle = match thread::Builder::new()
            .name("progress-console".to_string())
            .spawn(move || console.run(rx))
        {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!("progress console unavailable: {e}");
                None
            }
        };

        Self {
            tx,
            console: Mutex::new(handle),
            simulation: Mutex::new(None),
            config: config.simulation,
            next_id: AtomicU64::new(1),
        }
    }

    /// Report progress for `step`
    ///
    /// A new step force-completes the previous one and prints a header.
    /// Reaching 100 completes the step and stops its simulation.
    pub fn update(&self, step: &str, percent: Option<f64>) {
        self.send(Command::Update {
            step: step.to_string(),
            percent,
        });
    }

    /// Shorthand for `update(step, Some(100.0))`
    pub fn complete(&self, step: &str) {
        self.update(step, Some(100.0));
    }

    /// Trickle `step` from `start_from` towards `until` in the background
    ///
    /// Any running simulation is stopped and joined first. `until` is capped
    /// at [`MAX_SIMULATED_PERCENT`]; only [`update`](Self::update) can finish
    /// a step.
    pub fn start_simulated_progress(&self, step: &str, start_from: f64, until: f64) {
        let mut slot = lock(&self.simulation);
        if let Some(previous) = slot.take() {
            previous.stop();
            previous.join();
        }

        let start_from = clamp_percent(start_from).min(MAX_SIMULATED_PERCENT);
        let until = clamp_percent(until).min(MAX_SIMULATED_PERCENT);
        self.update(step, Some(start_from));

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let stop = Arc::new(AtomicBool::new(false));
        self.send(Command::Attach {
            id,
            step: step.to_string(),
            stop: stop.clone(),
        });

        tracing::debug!("simulating '{step}' from {start_from:.1}% to {until:.1}%");
        match Simulation::spawn(id, self.tx.clone(), stop, start_from, until, self.config.clone())
        {
            Ok(simulation) => *slot = Some(simulation),
            Err(e) => tracing::warn!("could not start simulated progress: {e}"),
        }
    }

    /// Block until the simulation thread has exited, then complete the
    /// current step
    pub fn wait_for_simulated_progress(&self) {
        let simulation = lock(&self.simulation).take();
        if let Some(simulation) = simulation {
            simulation.join();
        }
        self.send(Command::CompleteCurrent);
    }

    /// Stop and join the simulation without completing the step
    pub fn stop_simulated_progress(&self) {
        let simulation = lock(&self.simulation).take();
        if let Some(simulation) = simulation {
            simulation.stop();
            simulation.join();
        }
    }

    /// Whether a simulation thread is still running
    pub fn is_simulating(&self) -> bool {
        lock(&self.simulation)
            .as_ref()
            .is_some_and(|simulation| !simulation.is_finished())
    }

    /// Snapshot of the current state
    pub fn state(&self) -> ProgressState {
        let (reply, rx) = mpsc::channel();
        self.send(Command::Snapshot(reply));
        rx.recv().unwrap_or_default()
    }

    /// Block until the console has drawn every update sent so far
    ///
    /// Call this before writing to the terminal from another stream so the
    /// text does not land inside a half-drawn bar.
    pub fn sync(&self) {
        let _ = self.state();
    }

    /// Stop the simulation, flush, and shut the console thread down
    pub fn finish(&self) {
        self.stop_simulated_progress();
        let console = lock(&self.console).take();
        if let Some(console) = console {
            self.send(Command::Shutdown);
            if console.join().is_err() {
                tracing::debug!("progress console thread panicked");
            }
        }
    }

    fn send(&self, command: Command) {
        if self.tx.send(command).is_err() {
            tracing::debug!("progress console is gone; dropping update");
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.finish();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
