pub mod loop_fn;
pub mod observer;
pub mod report;
pub mod train_config;
pub mod trainer;

pub use loop_fn::Trainer;
pub use observer::{LogObserver, TrainingObserver};
pub use report::TrainingReport;
pub use train_config::TrainConfig;
pub use trainer::{evaluate, train_step};
