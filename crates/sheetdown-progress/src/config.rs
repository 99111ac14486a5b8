//! Reporter configuration

use std::time::Duration;

/// Options for the progress reporter
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    /// Width of the bar in characters
    pub bar_width: usize,
    /// Timing of simulated progress
    pub simulation: SimulationConfig,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            bar_width: 80,
            simulation: SimulationConfig::default(),
        }
    }
}

impl ProgressConfig {
    /// Millisecond-scale simulation, for tests and non-interactive runs
    pub fn fast() -> Self {
        Self {
            simulation: SimulationConfig {
                min_interval: Duration::from_millis(1),
                max_interval: Duration::from_millis(5),
                ..SimulationConfig::default()
            },
            ..Self::default()
        }
    }
}

/// Randomized pacing of the simulation thread
///
/// Each tick sleeps a uniform interval in `[min_interval, max_interval]`
/// and then advances by a uniform increment in
/// `[min_increment, max_increment]` percentage points.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub min_interval: Duration,
    pub max_interval: Duration,
    pub min_increment: f64,
    pub max_increment: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_millis(500),
            max_interval: Duration::from_secs(2),
            min_increment: 0.5,
            max_increment: 2.0,
        }
    }
}
