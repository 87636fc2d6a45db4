/// Stable index of a node inside a [`Graph`](super::graph::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Stable index of an edge inside a [`Graph`](super::graph::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A directed, weighted connection from a node in layer `i` to a node in
/// layer `i + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub weight: f64,
    pub source: NodeId,
    pub destination: NodeId,
}

/// A single neuron.
///
/// Edges are referenced by id; the owning graph holds the edges themselves.
/// `inputs` and `outputs` keep creation order, which is also the order the
/// parameter file uses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub inputs: Vec<EdgeId>,
    pub outputs: Vec<EdgeId>,
    /// Weighted sum of the source outputs from the last forward pass.
    pub input_total: f64,
    /// Sigmoid of `input_total`, or the raw datum for an input-layer node.
    pub output_value: f64,
    /// Backprop error term; only meaningful after a backward pass.
    pub error: f64,
}

impl Node {
    pub fn new() -> Node {
        Node::default()
    }

    /// Input-layer nodes have no incoming edges.
    pub fn is_input(&self) -> bool {
        self.inputs.is_empty()
    }
}
