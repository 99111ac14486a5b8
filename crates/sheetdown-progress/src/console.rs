//! Console actor
//!
//! The console thread is the only owner of [`ProgressState`] and of the
//! output writer. Everything else talks to it through [`Command`]s.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

use crate::bar::render_bar;
use crate::state::{clamp_percent, ProgressState};

/// Messages accepted by the console thread
pub(crate) enum Command {
    /// Deterministic update from the foreground
    Update { step: String, percent: Option<f64> },
    /// A simulation was started for `step`
    Attach {
        id: u64,
        step: String,
        stop: Arc<AtomicBool>,
    },
    /// Simulated tick
    Advance { id: u64, percent: f64 },
    /// The simulation thread exited
    SimulationFinished { id: u64 },
    /// Drive the current step to 100 if it is not there yet
    CompleteCurrent,
    Snapshot(Sender<ProgressState>),
    Shutdown,
}

struct Attached {
    id: u64,
    step: String,
    stop: Arc<AtomicBool>,
}

impl Attached {
    fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }
}

pub(crate) struct Console<W> {
    writer: W,
    bar_width: usize,
    state: ProgressState,
    attached: Option<Attached>,
}

impl<W: Write> Console<W> {
    pub(crate) fn new(writer: W, bar_width: usize) -> Self {
        Self {
            writer,
            bar_width,
            state: ProgressState::default(),
            attached: None,
        }
    }

    /// Process commands until `Shutdown` or until every sender is gone
    pub(crate) fn run(mut self, rx: Receiver<Command>) {
        for command in rx {
            if !self.handle(command) {
                break;
            }
        }
        let _ = self.writer.flush();
    }

    /// Apply one command; returns `false` on shutdown
    pub(crate) fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Update { step, percent } => self.update(step, percent),
            Command::Attach { id, step, stop } => {
                if step == self.state.current_step && !self.state.is_complete() {
                    self.attached = Some(Attached { id, step, stop });
                    self.state.simulation_active = true;
                } else {
                    stop.store(true, Ordering::SeqCst);
                }
            }
            Command::Advance { id, percent } => self.advance(id, percent),
            Command::SimulationFinished { id } => {
                if self.attached.as_ref().is_some_and(|a| a.id == id) {
                    self.detach();
                }
            }
            Command::CompleteCurrent => self.complete_current(),
            Command::Snapshot(reply) => {
                let _ = reply.send(self.state.clone());
            }
            Command::Shutdown => return false,
        }
        true
    }

    fn update(&mut self, step: String, percent: Option<f64>) {
        if step != self.state.current_step {
            self.complete_current();
            self.detach();
            let _ = write!(self.writer, "\n==> {}\n", step);
            let _ = self.writer.flush();
            self.state.current_step = step;
            self.state.percent = 0.0;
        }

        if let Some(percent) = percent {
            self.draw(clamp_percent(percent));
        }
    }

    fn advance(&mut self, id: u64, percent: f64) {
        let Some(attached) = &self.attached else {
            return;
        };
        let current = attached.id == id
            && attached.step == self.state.current_step
            && !attached.stop.load(Ordering::SeqCst);
        // Late or backwards ticks never redraw the bar.
        if current && !self.state.is_complete() && percent > self.state.percent {
            self.draw(clamp_percent(percent));
        }
    }

    fn complete_current(&mut self) {
        if !self.state.current_step.is_empty() && !self.state.is_complete() {
            self.draw(100.0);
        }
    }

    fn draw(&mut self, percent: f64) {
        self.state.percent = percent;
        let _ = write!(self.writer, "\r{}", render_bar(self.bar_width, percent));
        if self.state.is_complete() {
            let _ = writeln!(self.writer);
            self.detach();
        }
        let _ = self.writer.flush();
    }

    /// Stop and forget the simulation attached to the current step
    fn detach(&mut self) {
        if let Some(attached) = self.attached.take() {
            attached.stop();
        }
        self.state.simulation_active = false;
    }
}
