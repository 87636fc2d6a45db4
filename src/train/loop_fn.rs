use std::time::Instant;

use rand::Rng;

use crate::data::mnist::MnistDataset;
use crate::error::{Error, Result};
use crate::network::labels::LabelNames;
use crate::network::network::Network;
use crate::train::observer::TrainingObserver;
use crate::train::report::TrainingReport;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::{evaluate, train_step};

/// Drives a single online pass over the training split.
///
/// The dataset is laid out as `training_samples` samples used for updates,
/// followed by `test_samples` held-out samples used for the periodic
/// accuracy probe and the final score.
pub struct Trainer {
    config: TrainConfig,
    network: Network,
}

impl Trainer {
    /// Validates `config` and builds the untrained network it describes.
    pub fn new(config: TrainConfig) -> Result<Trainer> {
        config.validate()?;
        let network = Network::with_layers(&config.layer_sizes());
        Ok(Trainer { config, network })
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn into_network(self) -> Network {
        self.network
    }

    /// Reads exactly the samples this run needs from the configured files.
    pub fn load_dataset(&self) -> Result<MnistDataset> {
        MnistDataset::load(
            &self.config.images_path,
            &self.config.labels_path,
            self.config.total_samples(),
            self.config.input_nodes,
            self.config.output_nodes,
        )
    }

    /// Initializes the weights from `rng`, trains, scores the held-out split
    /// and saves if the observer agrees.
    ///
    /// # Arguments
    /// - `data`:     at least `training_samples + test_samples` samples, in that order
    /// - `rng`:      source for the initial weights; seed it for reproducible runs
    /// - `observer`: receives probe and final accuracy, answers the save prompt
    ///
    /// # Early termination
    /// `observer.should_stop()` is checked before every step. A stopped run
    /// still reports its final accuracy and still offers to save.
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        data: &MnistDataset,
        rng: &mut R,
        observer: &mut dyn TrainingObserver,
    ) -> Result<TrainingReport> {
        let needed = self.config.total_samples();
        let found = data.len().min(data.targets.len()).min(data.label_indexes.len());
        if found < needed {
            return Err(Error::NotEnoughSamples { needed, found });
        }

        let alpha = self.config.alpha;
        let offset = self.config.training_samples;
        let probe = offset..offset + self.config.eval_samples;
        let test = offset..offset + self.config.test_samples;

        self.network.initialize_weights(rng);
        log::info!(
            "training {:?} network on {} samples, alpha {}",
            self.network.layer_sizes(),
            self.config.training_samples,
            alpha
        );

        let t_start = Instant::now();
        let mut steps = 0;
        let mut stopped_early = false;
        let mut probes = Vec::new();

        // ── One online pass over the training split ──────────────────────
        for step in 0..self.config.training_samples {
            if observer.should_stop() {
                log::info!("stop requested after {steps} steps");
                stopped_early = true;
                break;
            }

            train_step(&mut self.network, &data.pixels[step], &data.targets[step], alpha);
            steps += 1;

            // ── Periodic probe ──────────────────────────────────────────
            if self.is_probe_step(step) {
                let accuracy = evaluate(
                    &mut self.network,
                    &data.pixels[probe.clone()],
                    &data.label_indexes[probe.clone()],
                );
                probes.push((step, accuracy));
                observer.on_progress(step, accuracy);
            }
        }
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        // ── Final score and save ─────────────────────────────────────────
        log::info!("testing on {} held-out samples", self.config.test_samples);
        let final_accuracy = evaluate(
            &mut self.network,
            &data.pixels[test.clone()],
            &data.label_indexes[test],
        );
        observer.on_complete(final_accuracy);

        let saved = if observer.confirm_save() {
            self.save()?;
            true
        } else {
            log::info!("parameters not saved");
            false
        };

        Ok(TrainingReport {
            steps,
            total_steps: self.config.training_samples,
            stopped_early,
            final_accuracy,
            probes,
            saved,
            elapsed_ms,
        })
    }

    /// Writes the parameter file and the numeric label-name file.
    pub fn save(&self) -> Result<()> {
        self.network.save(&self.config.parameters_path)?;
        LabelNames::numeric(self.config.output_nodes).save(&self.config.label_names_path)?;
        log::info!(
            "saved parameters to {} and label names to {}",
            self.config.parameters_path.display(),
            self.config.label_names_path.display()
        );
        Ok(())
    }

    fn is_probe_step(&self, step: usize) -> bool {
        let interval = self.config.eval_interval;
        interval > 0 && step > 0 && step % interval == 0
    }
}
