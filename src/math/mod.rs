pub mod gaussian;

pub use gaussian::{sample_standard_normal, sample_weight};
