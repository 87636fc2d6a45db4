use rand::Rng;

use crate::error::{Error, Result};
use crate::layers::dense::Layer;
use crate::network::graph::Graph;
use crate::network::node::EdgeId;

/// A fully connected feed-forward network of sigmoid neurons.
///
/// Layers are appended with [`Network::add_layer`]; each new layer is densely
/// connected to the previous one. The first layer takes the input vector and
/// the last layer produces one output per class.
#[derive(Debug, Clone, Default)]
pub struct Network {
    graph: Graph,
    layers: Vec<Layer>,
}

impl Network {
    pub fn new() -> Network {
        Network::default()
    }

    /// Builds a network with one layer per entry of `sizes`.
    pub fn with_layers(sizes: &[usize]) -> Network {
        let mut network = Network::new();
        for &size in sizes {
            network.add_layer(size);
        }
        network
    }

    /// Appends a layer of `node_count` nodes, connecting it densely to the
    /// current last layer if there is one.
    pub fn add_layer(&mut self, node_count: usize) {
        let layer = Layer::new(&mut self.graph, node_count);
        if let Some(last) = self.layers.last() {
            last.connect_densely(&mut self.graph, &layer);
        }
        self.layers.push(layer);
    }

    /// Drops every layer, node and edge.
    pub fn clear(&mut self) {
        self.layers.clear();
        self.graph.clear();
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer_sizes(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::size).collect()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Draws new random weights for every edge.
    pub fn initialize_weights<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for layer in &self.layers {
            layer.initialize_weight(&mut self.graph, rng);
        }
    }

    /// Feeds `inputs` through the network. Does nothing on an empty network.
    pub fn forward(&mut self, inputs: &[f64]) {
        let Some(first) = self.layers.first() else {
            return;
        };
        first.set_input_data(&mut self.graph, inputs);
        for layer in &self.layers {
            layer.calc_output_value(&mut self.graph);
        }
    }

    /// Output values of the last layer, in node order.
    pub fn outputs(&self) -> Vec<f64> {
        self.layers.last()
            .map(|layer| layer.output_values(&self.graph))
            .unwrap_or_default()
    }

    /// Index of the output node with the strictly greatest value.
    ///
    /// The scan starts from a candidate of 0.0 at index 0, so ties resolve to
    /// the lowest index and an output layer with no positive value yields 0.
    pub fn predicted_class(&self) -> usize {
        let mut max = 0.0;
        let mut index = 0;
        for (i, value) in self.outputs().into_iter().enumerate() {
            if value > max {
                max = value;
                index = i;
            }
        }
        index
    }

    /// Back-propagates the error for `targets`. Does nothing on an empty
    /// network.
    ///
    /// Output nodes past `targets.len()` keep whatever error they held
    /// before. Hidden layers are processed from the back so every layer sees
    /// its successor's fresh errors.
    pub fn backward(&mut self, targets: &[f64]) {
        let Some((last, rest)) = self.layers.split_last() else {
            return;
        };
        last.calc_output_error(&mut self.graph, targets);
        for layer in rest.iter().rev() {
            layer.calc_hidden_error(&mut self.graph);
        }
    }

    pub fn update_weights(&mut self, alpha: f64) {
        for layer in &self.layers {
            layer.update_weight(&mut self.graph, alpha);
        }
    }

    /// Mean squared error of the current outputs against `targets`.
    pub fn mean_squared_error(&self, targets: &[f64]) -> f64 {
        let outputs = self.outputs();
        if outputs.is_empty() {
            return 0.0;
        }
        outputs.iter().zip(targets)
            .map(|(o, t)| (o - t).powi(2))
            .sum::<f64>() / outputs.len() as f64
    }

    /// Edge ids in parameter-file order: layer → node → incoming edge.
    pub(crate) fn incoming_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.layers.iter()
            .flat_map(|layer| layer.nodes().iter())
            .flat_map(move |&node| self.graph.node(node).inputs.iter().copied())
    }

    /// All weights in parameter-file order.
    pub fn weights(&self) -> Vec<f64> {
        self.incoming_edges().map(|e| self.graph.edge(e).weight).collect()
    }

    /// Overwrites all weights in parameter-file order.
    pub fn set_weights(&mut self, weights: &[f64]) -> Result<()> {
        if weights.len() != self.edge_count() {
            return Err(Error::ShapeMismatch {
                expected: vec![self.edge_count()],
                found: vec![weights.len()],
            });
        }
        let order: Vec<EdgeId> = self.incoming_edges().collect();
        for (edge, &weight) in order.into_iter().zip(weights) {
            self.graph.edge_mut(edge).weight = weight;
        }
        Ok(())
    }

    /// Fails with [`Error::ShapeMismatch`] unless the layer sizes equal
    /// `expected`.
    pub fn check_shape(&self, expected: &[usize]) -> Result<()> {
        let found = self.layer_sizes();
        if found != expected {
            return Err(Error::ShapeMismatch { expected: expected.to_vec(), found });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn edge_count_is_sum_of_adjacent_products() {
        for sizes in [vec![3], vec![2, 3, 1], vec![784, 100, 10], vec![4, 5, 6, 7]] {
            let network = Network::with_layers(&sizes);
            let expected: usize = sizes.windows(2).map(|w| w[0] * w[1]).sum();
            assert_eq!(network.edge_count(), expected, "sizes {sizes:?}");
            assert_eq!(network.layer_sizes(), sizes);
        }
    }

    #[test]
    fn empty_network_operations_are_no_ops() {
        let mut network = Network::new();
        network.forward(&[1.0, 2.0]);
        network.backward(&[1.0]);
        network.update_weights(0.5);
        assert!(network.outputs().is_empty());
        assert_eq!(network.predicted_class(), 0);
        assert_eq!(network.layer_count(), 0);
    }

    #[test]
    fn forward_keeps_inputs_raw_and_squashes_the_rest() {
        let mut network = Network::with_layers(&[3, 4, 2]);
        network.initialize_weights(&mut StdRng::seed_from_u64(11));

        let inputs = [5.0, -2.5, 0.0];
        network.forward(&inputs);

        let first = &network.layers()[0];
        assert_eq!(first.output_values(network.graph()), inputs.to_vec());
        for layer in &network.layers()[1..] {
            for value in layer.output_values(network.graph()) {
                assert!(value > 0.0 && value < 1.0, "{value}");
            }
        }
    }

    #[test]
    fn single_layer_network_echoes_its_input() {
        let mut network = Network::with_layers(&[3]);
        network.forward(&[0.2, 0.9, 0.4]);
        assert_eq!(network.outputs(), vec![0.2, 0.9, 0.4]);
        assert_eq!(network.predicted_class(), 1);
    }

    #[test]
    fn predicted_class_breaks_ties_toward_lowest_index() {
        // All-zero weights give 0.5 on every output node.
        let mut network = Network::with_layers(&[2, 4]);
        network.forward(&[1.0, 1.0]);
        assert_eq!(network.outputs(), vec![0.5; 4]);
        assert_eq!(network.predicted_class(), 0);
    }

    #[test]
    fn predicted_class_finds_unique_maximum() {
        let mut network = Network::with_layers(&[3]);
        network.forward(&[0.1, 0.3, 0.7]);
        assert_eq!(network.predicted_class(), 2);

        network.forward(&[0.0, 0.0, 0.0]);
        assert_eq!(network.predicted_class(), 0);

        network.forward(&[-0.5, -0.1, -0.9]);
        assert_eq!(network.predicted_class(), 0);
    }

    #[test]
    fn short_targets_leave_trailing_errors_stale() {
        let mut network = Network::with_layers(&[1, 2]);
        network.forward(&[1.0]);
        network.backward(&[1.0, 0.0]);

        let last = network.layers()[1].nodes().to_vec();
        assert_eq!(network.graph().node(last[0]).error, 0.5);
        assert_eq!(network.graph().node(last[1]).error, -0.5);

        network.backward(&[0.0]);
        assert_eq!(network.graph().node(last[0]).error, -0.5);
        // Untouched by the second pass.
        assert_eq!(network.graph().node(last[1]).error, -0.5);
    }

    #[test]
    fn one_step_reduces_squared_error() {
        let mut network = Network::with_layers(&[4, 6, 3]);
        network.initialize_weights(&mut StdRng::seed_from_u64(2024));

        let inputs = [0.9, 0.1, 0.5, 0.3];
        let targets = [0.99, 0.01, 0.01];

        network.forward(&inputs);
        let before = network.mean_squared_error(&targets);

        network.backward(&targets);
        network.update_weights(0.1);
        network.forward(&inputs);
        let after = network.mean_squared_error(&targets);

        assert!(after < before, "before {before}, after {after}");
    }

    #[test]
    fn repeated_updates_drive_output_toward_target() {
        let mut network = Network::with_layers(&[2, 3, 1]);
        let weights = [0.1, -0.2, 0.3, 0.05, 0.15, -0.1, 0.2, 0.1, -0.3];
        network.set_weights(&weights).unwrap();

        let inputs = [1.0, 0.0];
        let targets = [1.0];

        let mut last_error = f64::INFINITY;
        for iteration in 0..50 {
            network.forward(&inputs);
            let error = (targets[0] - network.outputs()[0]).abs();
            if iteration < 10 {
                assert!(error < last_error, "iteration {iteration}: {error} >= {last_error}");
            }
            last_error = error;
            network.backward(&targets);
            network.update_weights(0.5);
        }

        network.forward(&inputs);
        let output = network.outputs()[0];
        assert!(output > 0.7, "{output}");
        assert!((1.0 - output) < last_error);
    }

    #[test]
    fn weights_round_trip_in_canonical_order() {
        let mut network = Network::with_layers(&[2, 2]);
        network.set_weights(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(network.weights(), vec![1.0, 2.0, 3.0, 4.0]);

        // Node 0 of layer 1 receives the edges created first from each source.
        let target = network.layers()[1].nodes()[0];
        let incoming: Vec<f64> = network.graph().node(target).inputs.iter()
            .map(|&e| network.graph().edge(e).weight)
            .collect();
        assert_eq!(incoming, vec![1.0, 2.0]);
    }

    #[test]
    fn set_weights_rejects_wrong_length() {
        let mut network = Network::with_layers(&[2, 2]);
        assert!(matches!(
            network.set_weights(&[1.0]),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn check_shape_compares_layer_sizes() {
        let network = Network::with_layers(&[4, 2]);
        assert!(network.check_shape(&[4, 2]).is_ok());
        assert!(network.check_shape(&[4, 3]).is_err());
    }
}
