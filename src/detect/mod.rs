pub mod detector;

pub use detector::{Detection, Detector};
