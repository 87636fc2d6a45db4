use crate::network::network::Network;

/// One online gradient step on a single sample: forward, backward, update.
pub fn train_step(network: &mut Network, input: &[f64], target: &[f64], alpha: f64) {
    network.forward(input);
    network.backward(target);
    network.update_weights(alpha);
}

/// Fraction of `inputs` whose predicted class equals the matching entry of
/// `classes`. Returns 0.0 for an empty slice.
pub fn evaluate(network: &mut Network, inputs: &[Vec<f64>], classes: &[usize]) -> f64 {
    let n = inputs.len().min(classes.len());
    if n == 0 {
        return 0.0;
    }
    let correct = inputs.iter().zip(classes)
        .filter(|(input, class)| {
            network.forward(input);
            network.predicted_class() == **class
        })
        .count();
    correct as f64 / n as f64
}
