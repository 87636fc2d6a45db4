use serde::{Deserialize, Serialize};

/// Summary of a finished training run, returned by `Trainer::run`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Training steps actually performed.
    pub steps: usize,
    /// Steps requested by the config.
    pub total_steps: usize,
    /// True when the observer asked to stop before all steps ran.
    pub stopped_early: bool,
    /// Accuracy over the full held-out split, in [0, 1].
    pub final_accuracy: f64,
    /// Accuracy probes taken during training, as `(step, accuracy)`.
    pub probes: Vec<(usize, f64)>,
    /// Whether the parameters and label names were written.
    pub saved: bool,
    /// Wall-clock duration of the training loop in milliseconds.
    pub elapsed_ms: u64,
}
