pub mod activation;
pub mod data;
pub mod detect;
pub mod error;
pub mod layers;
pub mod math;
pub mod network;
pub mod train;

// Convenience re-exports
pub use data::mnist::MnistDataset;
pub use detect::detector::{Detection, Detector};
pub use error::{Error, Result};
pub use layers::dense::Layer;
pub use network::labels::LabelNames;
pub use network::network::Network;
pub use train::loop_fn::Trainer;
pub use train::observer::{LogObserver, TrainingObserver};
pub use train::train_config::TrainConfig;
