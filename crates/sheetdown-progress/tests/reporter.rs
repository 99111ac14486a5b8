//! End-to-end tests for the progress reporter, driven through its public API
//! with a captured console.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use sheetdown_progress::{ProgressConfig, ProgressReporter};

/// Clonable in-memory console
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn reporter() -> (ProgressReporter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let progress = ProgressReporter::with_writer(buffer.clone(), ProgressConfig::fast());
    (progress, buffer)
}

#[test]
fn test_deterministic_step() {
    let (progress, buffer) = reporter();
    progress.update("Authenticating with Google", Some(0.0));
    progress.update("Authenticating with Google", Some(50.0));
    progress.complete("Authenticating with Google");
    progress.finish();

    let out = buffer.contents();
    assert_eq!(out.matches("==> Authenticating with Google").count(), 1);
    assert!(out.contains(" 50.0%"));
    assert!(out.ends_with("100.0%\n"));
}

#[test]
fn test_simulation_then_completion() {
    let (progress, buffer) = reporter();
    progress.start_simulated_progress("Retrieving spreadsheet data", 0.0, 80.0);
    thread::sleep(Duration::from_millis(30));
    progress.update("Retrieving spreadsheet data", Some(85.0));
    progress.complete("Retrieving spreadsheet data");
    progress.wait_for_simulated_progress();

    assert!(!progress.is_simulating());
    let state = progress.state();
    assert_eq!(state.current_step, "Retrieving spreadsheet data");
    assert_eq!(state.percent, 100.0);
    assert!(!state.simulation_active);

    progress.finish();
    let out = buffer.contents();
    assert_eq!(out.matches("==> Retrieving spreadsheet data").count(), 1);
    assert_eq!(out.matches("100.0%").count(), 1);
}

#[test]
fn test_wait_leaves_last_step_complete() {
    let (progress, _buffer) = reporter();
    progress.update("A", Some(10.0));
    progress.start_simulated_progress("B", 0.0, 20.0);
    progress.start_simulated_progress("C", 5.0, 15.0);
    progress.wait_for_simulated_progress();

    assert!(!progress.is_simulating());
    let state = progress.state();
    assert_eq!(state.current_step, "C");
    assert_eq!(state.percent, 100.0);
}

#[test]
fn test_new_simulation_force_completes_previous_step_first() {
    let (progress, buffer) = reporter();
    progress.start_simulated_progress("Step A", 0.0, 90.0);
    thread::sleep(Duration::from_millis(20));
    progress.start_simulated_progress("Step B", 0.0, 90.0);
    progress.complete("Step B");
    progress.wait_for_simulated_progress();
    progress.finish();

    let out = buffer.contents();
    let a_header = out.find("==> Step A").unwrap();
    let a_done = out.find("100.0%").unwrap();
    let b_header = out.find("==> Step B").unwrap();
    assert!(a_header < a_done);
    assert!(a_done < b_header);
    // Nothing from step A's simulation lands after step B's header.
    assert_eq!(out[b_header..].matches("100.0%").count(), 1);
}

#[test]
fn test_simulation_advances_but_never_completes() {
    let (progress, _buffer) = reporter();
    progress.start_simulated_progress("Generating file name", 95.0, 100.0);

    let deadline = Instant::now() + Duration::from_secs(5);
    while progress.state().percent <= 95.0 && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
    let state = progress.state();
    assert!(state.percent > 95.0, "simulation never ticked: {state:?}");
    assert!(state.percent <= 99.0);

    progress.stop_simulated_progress();
    assert!(progress.state().percent < 100.0);
}

#[test]
fn test_sync_waits_for_console() {
    let (progress, buffer) = reporter();
    progress.update("Saving output", Some(10.0));
    progress.complete("Saving output");
    progress.sync();
    assert!(buffer.contents().ends_with("100.0%\n"));
}

#[test]
fn test_reporter_is_shareable_across_threads() {
    let (progress, _buffer) = reporter();
    let progress = Arc::new(progress);
    let worker = {
        let progress = Arc::clone(&progress);
        thread::spawn(move || progress.update("From worker", Some(40.0)))
    };
    worker.join().unwrap();
    assert_eq!(progress.state().current_step, "From worker");
}

#[test]
fn test_finish_is_idempotent() {
    let (progress, _buffer) = reporter();
    progress.update("A", Some(1.0));
    progress.finish();
    progress.finish();
    progress.update("B", Some(2.0));
    assert_eq!(progress.state(), Default::default());
}
