//! Control-path discovery over the relay network.
//!
//! The best route from a vessel to the ground segment is the one
//! maximizing the product of hop strengths, found as a shortest path on
//! `-ln(strength)` edge weights. Zero-strength links are impassable.

use crate::{NetworkGraph, NodeKind};
use petgraph::algo::astar;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use relay_comms::{Hop, TopologyProvider};
use tracing::trace;

impl NetworkGraph {
    /// Best path from a vessel to any ground station, as node ids starting
    /// with the vessel itself. `None` when the vessel is unknown or
    /// disconnected from the ground segment.
    pub fn control_path(&self, vessel_id: &str) -> Option<Vec<String>> {
        let start = self.index_of(vessel_id)?;
        let path = self.best_path(start)?;
        Some(
            path.into_iter()
                .map(|idx| self.graph()[idx].id.clone())
                .collect(),
        )
    }

    fn best_path(&self, start: NodeIndex) -> Option<Vec<NodeIndex>> {
        let graph = self.graph();
        let (cost, path) = astar(
            graph,
            start,
            |node| graph[node].is_ground_station(),
            |edge| {
                let strength = edge.weight().strength;
                if strength > 0.0 {
                    -strength.ln()
                } else {
                    f64::INFINITY
                }
            },
            |_| 0.0,
        )?;

        // An infinite cost means the only way out crossed a dead link
        if !cost.is_finite() || path.len() < 2 {
            return None;
        }

        trace!(
            hops = path.len() - 1,
            strength_product = (-cost).exp(),
            "control path found"
        );
        Some(path)
    }
}

impl TopologyProvider for NetworkGraph {
    fn is_ready(&self) -> bool {
        self.has_ground_station()
    }

    fn first_hop(&self, vessel_id: &str) -> Option<Hop> {
        let start = self.index_of(vessel_id)?;
        if let NodeKind::GroundStation { .. } = self.graph()[start].kind {
            return None;
        }

        let path = self.best_path(start)?;
        let next = path[1];
        let edge = self.graph().find_edge(start, next)?;
        let link = self.graph()[edge];
        let from = &self.graph()[start];
        let to = &self.graph()[next];

        Some(Hop {
            far_end_id: to.id.clone(),
            far_end_name: to.name.clone(),
            far_end_is_ground_station: to.is_ground_station(),
            strength: link.strength,
            distance_m: link.distance_m,
            start_transmit_power: from.transmit_power(),
            start_relay_power: from.relay_power(),
            end_relay_power: to.relay_power(),
        })
    }
}
