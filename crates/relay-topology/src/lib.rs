//! Relay Topology
//!
//! In-memory network graph backing the topology-provider contract of the
//! link-state core:
//!
//! - Vessels and ground stations as nodes, radio links as edges
//! - Control-path discovery maximizing the product of hop strengths
//! - First-hop queries with both endpoints' power figures
//!
//! Link strengths and distances are supplied by whoever builds the graph;
//! this crate does no radio-wave or line-of-sight modeling. Strength is
//! clamped to [0, 1] on insertion, which is the clamp the engine relies on.

use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub mod route;

#[derive(Error, Debug)]
pub enum TopologyError {
    #[error("Node already exists: {0}")]
    DuplicateNode(String),
    #[error("Node not found: {0}")]
    NodeNotFound(String),
}

pub type Result<T> = std::result::Result<T, TopologyError>;

/// Node roles in the relay network
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Vessel {
        transmit_power: f64,
        relay_power: f64,
    },
    GroundStation {
        relay_power: f64,
    },
}

/// A node in the relay network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
}

impl NetworkNode {
    pub fn vessel(
        id: impl Into<String>,
        name: impl Into<String>,
        transmit_power: f64,
        relay_power: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: NodeKind::Vessel {
                transmit_power,
                relay_power,
            },
        }
    }

    pub fn ground_station(
        id: impl Into<String>,
        name: impl Into<String>,
        relay_power: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: NodeKind::GroundStation { relay_power },
        }
    }

    pub fn is_ground_station(&self) -> bool {
        matches!(self.kind, NodeKind::GroundStation { .. })
    }

    pub fn transmit_power(&self) -> f64 {
        match self.kind {
            NodeKind::Vessel { transmit_power, .. } => transmit_power,
            NodeKind::GroundStation { .. } => 0.0,
        }
    }

    pub fn relay_power(&self) -> f64 {
        match self.kind {
            NodeKind::Vessel { relay_power, .. } => relay_power,
            NodeKind::GroundStation { relay_power } => relay_power,
        }
    }
}

/// A radio link between two nodes
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RadioLink {
    /// Signal quality, [0, 1]
    pub strength: f64,
    /// Geometric distance between the endpoints, m
    pub distance_m: f64,
}

impl RadioLink {
    pub fn new(strength: f64, distance_m: f64) -> Self {
        Self {
            strength: strength.clamp(0.0, 1.0),
            distance_m,
        }
    }
}

/// The relay network graph
pub struct NetworkGraph {
    graph: UnGraph<NetworkNode, RadioLink>,
    index: HashMap<String, NodeIndex>,
}

impl NetworkGraph {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            index: HashMap::new(),
        }
    }

    pub fn add_node(&mut self, node: NetworkNode) -> Result<NodeIndex> {
        if self.index.contains_key(&node.id) {
            return Err(TopologyError::DuplicateNode(node.id));
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(id, idx);
        Ok(idx)
    }

    /// Connect two existing nodes. The link strength is clamped to [0, 1].
    pub fn add_link(&mut self, a: &str, b: &str, link: RadioLink) -> Result<()> {
        let a_idx = self.node_index(a)?;
        let b_idx = self.node_index(b)?;
        self.graph
            .add_edge(a_idx, b_idx, RadioLink::new(link.strength, link.distance_m));
        Ok(())
    }

    pub fn node(&self, id: &str) -> Option<&NetworkNode> {
        self.index.get(id).map(|idx| &self.graph[*idx])
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn has_ground_station(&self) -> bool {
        self.graph
            .node_weights()
            .any(|node| node.is_ground_station())
    }

    fn node_index(&self, id: &str) -> Result<NodeIndex> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| TopologyError::NodeNotFound(id.to_string()))
    }

    pub(crate) fn graph(&self) -> &UnGraph<NetworkNode, RadioLink> {
        &self.graph
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }
}

impl Default for NetworkGraph {
    fn default() -> Self {
        Self::new()
    }
}
