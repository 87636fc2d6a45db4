/// Logistic sigmoid: maps any real input total into (0, 1).
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Derivative of the sigmoid, expressed in terms of its own output.
///
/// Callers pass the node's *output value*, not its input total:
/// σ'(z) = σ(z)·(1 − σ(z)).
pub fn sigmoid_derivative(output: f64) -> f64 {
    output * (1.0 - output)
}
