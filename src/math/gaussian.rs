use rand::Rng;
use std::f64::consts::PI;

/// Scale applied to every initial weight draw.
pub const WEIGHT_SCALE: f64 = 0.1;

/// Samples a single value from N(0, 1) using the Box-Muller transform.
pub fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // Draw two independent uniform samples in (0, 1] to avoid log(0).
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = 1.0 - rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Initial edge weight: N(0, 1) scaled down to a 0.1 standard deviation.
pub fn sample_weight<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    sample_standard_normal(rng) * WEIGHT_SCALE
}
