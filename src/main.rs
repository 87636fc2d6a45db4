//! synapse: train a 784-100-10 sigmoid network on MNIST, or classify a
//! hand-drawn digit with a saved parameter file.
//!
//! Run with:
//!   cargo run --release -- train --images mnist/train-images.idx3-ubyte \
//!       --labels mnist/train-labels.idx1-ubyte
//!   cargo run --release -- detect FreeHand.bmp --invert

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use synapse_nn::{Detector, LogObserver, Result, TrainConfig, Trainer};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Train on the MNIST training files and optionally save the weights.
    Train {
        /// JSON config; flags below override its values.
        #[arg(long)]
        config: Option<String>,
        #[arg(long)]
        images: Option<PathBuf>,
        #[arg(long)]
        labels: Option<PathBuf>,
        /// Where to write the parameter file.
        #[arg(long)]
        parameters: Option<PathBuf>,
        /// Where to write the comma-separated label names.
        #[arg(long)]
        label_names: Option<PathBuf>,
        /// Learning rate.
        #[arg(long)]
        alpha: Option<f64>,
        /// Seed for weight initialization.
        #[arg(long)]
        seed: Option<u64>,
        /// Save without asking.
        #[arg(short, long)]
        yes: bool,
    },
    /// Classify an image with a trained parameter file.
    Detect {
        image: PathBuf,
        #[arg(long, default_value = "Weight.dat")]
        parameters: PathBuf,
        #[arg(long, default_value = "Label.txt")]
        label_names: PathBuf,
        /// Treat the image as dark ink on a light background.
        #[arg(long)]
        invert: bool,
    },
}

fn main() -> ExitCode {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let args = Args::parse();
    let outcome = match args.command {
        Command::Train { config, images, labels, parameters, label_names, alpha, seed, yes } => {
            load_config(config.as_deref()).and_then(|mut cfg| {
                if let Some(images) = images {
                    cfg.images_path = images;
                }
                if let Some(labels) = labels {
                    cfg.labels_path = labels;
                }
                if let Some(parameters) = parameters {
                    cfg.parameters_path = parameters;
                }
                if let Some(label_names) = label_names {
                    cfg.label_names_path = label_names;
                }
                if let Some(alpha) = alpha {
                    cfg.alpha = alpha;
                }
                if seed.is_some() {
                    cfg.seed = seed;
                }
                train(cfg, yes)
            })
        }
        Command::Detect { image, parameters, label_names, invert } => {
            detect(&image, &parameters, &label_names, invert)
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&str>) -> Result<TrainConfig> {
    match path {
        Some(path) => {
            log::info!("reading config from {path}");
            TrainConfig::load_json(path)
        }
        None => Ok(TrainConfig::default()),
    }
}

fn train(config: TrainConfig, assume_yes: bool) -> Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut trainer = Trainer::new(config)?;
    let data = trainer.load_dataset()?;
    let mut observer = LogObserver::new(assume_yes);
    let report = trainer.run(&data, &mut rng, &mut observer)?;

    log::info!(
        "{} of {} steps in {} ms, test accuracy {:.2}%",
        report.steps,
        report.total_steps,
        report.elapsed_ms,
        report.final_accuracy * 100.0
    );
    log::debug!("report: {}", serde_json::to_string(&report)?);
    Ok(())
}

fn detect(image: &Path, parameters: &Path, label_names: &Path, invert: bool) -> Result<()> {
    let mut detector = Detector::from_files(parameters, label_names)?;
    let detection = detector.detect_file(image, invert)?;
    log::info!("{} -> class {}", image.display(), detection.class);
    println!("{}", detection.label);
    Ok(())
}
