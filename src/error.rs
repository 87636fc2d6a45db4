use thiserror::Error;

/// Every failure the engine, trainer and detector can report.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid parameter file: {0}")]
    InvalidParameterFile(String),

    #[error("label at index {index} is {label}, but only {classes} classes exist")]
    InvalidLabel { index: usize, label: u8, classes: usize },

    #[error("layer shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch { expected: Vec<usize>, found: Vec<usize> },

    #[error("dataset has {found} samples, but {needed} are required")]
    NotEnoughSamples { needed: usize, found: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
