use rand::Rng;

use crate::activation::{sigmoid, sigmoid_derivative};
use crate::math::sample_weight;
use crate::network::node::{Edge, EdgeId, Node, NodeId};

/// Arena that owns every node and edge of one network.
///
/// Nodes and edges refer to each other only through [`NodeId`] and
/// [`EdgeId`], so the cyclic node ↔ edge relationship needs no shared
/// ownership. Ids are never reused or invalidated while the graph lives.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Graph {
        Graph::default()
    }

    pub fn add_node(&mut self) -> NodeId {
        self.nodes.push(Node::new());
        NodeId(self.nodes.len() - 1)
    }

    /// Creates an edge `from → to` with weight 0.0 and registers it in both
    /// endpoints' edge lists.
    pub fn connect(&mut self, from: NodeId, to: NodeId) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge { weight: 0.0, source: from, destination: to });
        self.nodes[from.0].outputs.push(id);
        self.nodes[to.0].inputs.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.0]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Draws a fresh weight for every incoming edge of `node`.
    pub fn initialize_weight<R: Rng + ?Sized>(&mut self, node: NodeId, rng: &mut R) {
        let Graph { nodes, edges } = self;
        for &edge in &nodes[node.0].inputs {
            edges[edge.0].weight = sample_weight(rng);
        }
    }

    /// Recomputes `input_total` and `output_value` from the sources' outputs.
    /// Input-layer nodes keep the value that was set externally.
    pub fn calc_output_value(&mut self, node: NodeId) {
        let current = &self.nodes[node.0];
        if current.is_input() {
            return;
        }

        let total: f64 = current.inputs.iter()
            .map(|&e| {
                let edge = &self.edges[e.0];
                edge.weight * self.nodes[edge.source.0].output_value
            })
            .sum();

        let current = &mut self.nodes[node.0];
        current.input_total = total;
        current.output_value = sigmoid(total);
    }

    /// Output-layer error: `target − output`.
    pub fn calc_output_error(&mut self, node: NodeId, target: f64) {
        let current = &mut self.nodes[node.0];
        current.error = target - current.output_value;
    }

    /// Hidden-layer error: downstream errors weighted by the forward weights.
    /// The next layer's errors must already be up to date.
    pub fn calc_hidden_error(&mut self, node: NodeId) {
        let error: f64 = self.nodes[node.0].outputs.iter()
            .map(|&e| {
                let edge = &self.edges[e.0];
                edge.weight * self.nodes[edge.destination.0].error
            })
            .sum();
        self.nodes[node.0].error = error;
    }

    /// Gradient step on every incoming edge of `node`:
    /// `w += alpha · error · σ'(output) · source_output`.
    pub fn update_weight(&mut self, node: NodeId, alpha: f64) {
        let Graph { nodes, edges } = self;
        let current = &nodes[node.0];
        let gradient = alpha * current.error * sigmoid_derivative(current.output_value);
        for &e in &current.inputs {
            let edge = &mut edges[e.0];
            edge.weight += gradient * nodes[edge.source.0].output_value;
        }
    }
}
