use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for a training run.
///
/// Every field has a default, so a JSON file only needs the keys it wants to
/// change. The defaults reproduce the classic MNIST setup:
/// 784 → 100 → 10, α = 0.1, 50 000 training samples followed by 10 000 test
/// samples, and a 100-sample accuracy probe every 100 steps.
///
/// # Fields
/// - `alpha`             — constant learning rate
/// - `input_nodes`       — input layer size (pixels per image)
/// - `hidden_layers`     — sizes of the hidden layers, in order
/// - `output_nodes`      — output layer size (number of classes)
/// - `training_samples`  — samples used for weight updates, taken from the
///                         start of the dataset
/// - `test_samples`      — held-out samples that follow the training ones
/// - `eval_interval`     — steps between accuracy probes; `0` disables them
/// - `eval_samples`      — size of each probe, taken from the held-out split
/// - `seed`              — fixed weight-initialization seed, if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub alpha: f64,
    pub input_nodes: usize,
    pub hidden_layers: Vec<usize>,
    pub output_nodes: usize,
    pub training_samples: usize,
    pub test_samples: usize,
    pub eval_interval: usize,
    pub eval_samples: usize,
    pub seed: Option<u64>,
    pub images_path: PathBuf,
    pub labels_path: PathBuf,
    pub parameters_path: PathBuf,
    pub label_names_path: PathBuf,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            alpha: 0.1,
            input_nodes: 28 * 28,
            hidden_layers: vec![100],
            output_nodes: 10,
            training_samples: 50_000,
            test_samples: 10_000,
            eval_interval: 100,
            eval_samples: 100,
            seed: None,
            images_path: PathBuf::from("mnist/train-images.idx3-ubyte"),
            labels_path: PathBuf::from("mnist/train-labels.idx1-ubyte"),
            parameters_path: PathBuf::from("Weight.dat"),
            label_names_path: PathBuf::from("Label.txt"),
        }
    }
}

impl TrainConfig {
    /// Input, hidden and output sizes, in network order.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.hidden_layers.len() + 2);
        sizes.push(self.input_nodes);
        sizes.extend_from_slice(&self.hidden_layers);
        sizes.push(self.output_nodes);
        sizes
    }

    /// Samples the run reads from the dataset files.
    pub fn total_samples(&self) -> usize {
        self.training_samples + self.test_samples
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(Error::InvalidConfig(format!("alpha must be positive, got {}", self.alpha)));
        }
        if self.input_nodes == 0 || self.output_nodes == 0 {
            return Err(Error::InvalidConfig("input and output layers need at least one node".into()));
        }
        if self.hidden_layers.contains(&0) {
            return Err(Error::InvalidConfig("hidden layers need at least one node".into()));
        }
        if self.eval_samples > self.test_samples {
            return Err(Error::InvalidConfig(format!(
                "eval_samples ({}) exceeds test_samples ({})",
                self.eval_samples, self.test_samples
            )));
        }
        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a config from a JSON file; missing keys keep their
    /// defaults.
    pub fn load_json(path: &str) -> Result<TrainConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
