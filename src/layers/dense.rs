use rand::Rng;

use crate::network::graph::Graph;
use crate::network::node::NodeId;

/// An ordered, fixed-size group of nodes.
///
/// Position matters: node `i` receives input datum `i` on the input layer and
/// stands for class `i` on the output layer.
#[derive(Debug, Clone)]
pub struct Layer {
    nodes: Vec<NodeId>,
}

impl Layer {
    /// Allocates `size` fresh nodes in `graph`.
    pub fn new(graph: &mut Graph, size: usize) -> Layer {
        let nodes = (0..size).map(|_| graph.add_node()).collect();
        Layer { nodes }
    }

    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Connects every node of `self` to every node of `next`.
    ///
    /// Outer loop over `self`, inner over `next`. The parameter file depends
    /// on this order.
    pub fn connect_densely(&self, graph: &mut Graph, next: &Layer) {
        for &from in &self.nodes {
            for &to in &next.nodes {
                graph.connect(from, to);
            }
        }
    }

    pub fn initialize_weight<R: Rng + ?Sized>(&self, graph: &mut Graph, rng: &mut R) {
        for &node in &self.nodes {
            graph.initialize_weight(node, rng);
        }
    }

    /// Writes `inputs` into the node outputs. Missing values become 0.0 and
    /// extra values are ignored.
    pub fn set_input_data(&self, graph: &mut Graph, inputs: &[f64]) {
        for (i, &node) in self.nodes.iter().enumerate() {
            graph.node_mut(node).output_value = inputs.get(i).copied().unwrap_or(0.0);
        }
    }

    pub fn calc_output_value(&self, graph: &mut Graph) {
        for &node in &self.nodes {
            graph.calc_output_value(node);
        }
    }

    /// Sets output errors for the first `targets.len()` nodes; any nodes past
    /// the end of `targets` keep their previous error.
    pub fn calc_output_error(&self, graph: &mut Graph, targets: &[f64]) {
        for (&node, &target) in self.nodes.iter().zip(targets) {
            graph.calc_output_error(node, target);
        }
    }

    pub fn calc_hidden_error(&self, graph: &mut Graph) {
        for &node in &self.nodes {
            graph.calc_hidden_error(node);
        }
    }

    pub fn update_weight(&self, graph: &mut Graph, alpha: f64) {
        for &node in &self.nodes {
            graph.update_weight(node, alpha);
        }
    }

    pub fn output_values(&self, graph: &Graph) -> Vec<f64> {
        self.nodes.iter().map(|&node| graph.node(node).output_value).collect()
    }
}
