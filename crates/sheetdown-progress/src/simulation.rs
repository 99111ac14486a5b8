//! Simulated progress worker

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rand::Rng;

use crate::config::SimulationConfig;
use crate::console::Command;

/// Longest uninterrupted sleep, so a stop request is noticed quickly
const STOP_POLL: Duration = Duration::from_millis(25);

/// Handle to a running simulation thread
pub(crate) struct Simulation {
    id: u64,
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl Simulation {
    /// Spawn a worker that ticks from `start_from` towards `until`
    pub(crate) fn spawn(
        id: u64,
        tx: Sender<Command>,
        stop: Arc<AtomicBool>,
        start_from: f64,
        until: f64,
        config: SimulationConfig,
    ) -> std::io::Result<Self> {
        let worker_stop = stop.clone();
        let handle = thread::Builder::new()
            .name(format!("progress-sim-{id}"))
            .spawn(move || run(id, tx, worker_stop, start_from, until, config))?;
        Ok(Self { id, stop, handle })
    }

    pub(crate) fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub(crate) fn join(self) {
        if self.handle.join().is_err() {
            tracing::debug!("simulation thread {} panicked", self.id);
        }
    }
}

fn run(
    id: u64,
    tx: Sender<Command>,
    stop: Arc<AtomicBool>,
    start_from: f64,
    until: f64,
    config: SimulationConfig,
) {
    let mut rng = rand::thread_rng();
    let mut current = start_from;

    while !stop.load(Ordering::SeqCst) && current < until {
        let interval = sample_duration(&mut rng, config.min_interval, config.max_interval);
        if !sleep_unless_stopped(interval, &stop) {
            break;
        }
        let increment = sample_f64(&mut rng, config.min_increment, config.max_increment);
        current = (current + increment).min(until);
        if tx.send(Command::Advance { id, percent: current }).is_err() {
            break;
        }
    }

    tracing::debug!("simulation {id} exiting at {current:.1}%");
    let _ = tx.send(Command::SimulationFinished { id });
}

/// Sleep for `duration`; returns `false` if stopped in the meantime
fn sleep_unless_stopped(duration: Duration, stop: &AtomicBool) -> bool {
    let deadline = Instant::now() + duration;
    loop {
        if stop.load(Ordering::SeqCst) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep((deadline - now).min(STOP_POLL));
    }
}

fn sample_duration<R: Rng>(rng: &mut R, min: Duration, max: Duration) -> Duration {
    if min >= max {
        min
    } else {
        rng.gen_range(min..=max)
    }
}

fn sample_f64<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    if min >= max {
        min
    } else {
        rng.gen_range(min..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn fast() -> SimulationConfig {
        SimulationConfig {
            min_interval: Duration::from_millis(1),
            max_interval: Duration::from_millis(2),
            min_increment: 5.0,
            max_increment: 10.0,
        }
    }

    #[test]
    fn test_worker_stops_at_until() {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let sim = Simulation::spawn(1, tx, stop, 0.0, 40.0, fast()).unwrap();
        sim.join();

        let mut last = 0.0;
        let mut finished = false;
        for command in rx.try_iter() {
            match command {
                Command::Advance { id, percent } => {
                    assert_eq!(id, 1);
                    assert!(percent > last && percent <= 40.0);
                    last = percent;
                }
                Command::SimulationFinished { id } => {
                    assert_eq!(id, 1);
                    finished = true;
                }
                _ => panic!("unexpected command"),
            }
        }
        assert_eq!(last, 40.0);
        assert!(finished);
    }

    #[test]
    fn test_worker_honours_stop() {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(true));
        let sim = Simulation::spawn(2, tx, stop, 0.0, 90.0, fast()).unwrap();
        sim.join();
        let commands: Vec<Command> = rx.try_iter().collect();
        assert_eq!(commands.len(), 1);
        assert!(matches!(commands[0], Command::SimulationFinished { id: 2 }));
    }

    #[test]
    fn test_sample_degenerate_ranges() {
        let mut rng = rand::thread_rng();
        assert_eq!(sample_f64(&mut rng, 2.0, 1.0), 2.0);
        let d = Duration::from_millis(3);
        assert_eq!(sample_duration(&mut rng, d, d), d);
    }
}
