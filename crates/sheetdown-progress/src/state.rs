//! Progress state owned by the console thread

/// Snapshot of the reporter's state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressState {
    /// Label of the step being reported (empty before the first update)
    pub current_step: String,
    /// Completion percentage of the current step, in `[0, 100]`
    pub percent: f64,
    /// Whether a simulation is attached to the current step
    pub simulation_active: bool,
}

impl ProgressState {
    /// Check if the current step has reached 100%
    pub fn is_complete(&self) -> bool {
        self.percent >= 100.0
    }
}

/// Clamp a caller-supplied percentage; NaN counts as 0
pub(crate) fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}
