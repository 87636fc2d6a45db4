pub mod graph;
pub mod labels;
pub mod network;
pub mod node;
pub mod params;

pub use graph::Graph;
pub use labels::LabelNames;
pub use network::Network;
pub use node::{Edge, EdgeId, Node, NodeId};
