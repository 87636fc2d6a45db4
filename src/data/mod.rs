pub mod bitmap;
pub mod mnist;

pub use mnist::{normalize_pixel, one_hot, MnistDataset};
