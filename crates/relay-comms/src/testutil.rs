//! Shared fixtures for engine and property tests.

use crate::{ComputedLinkState, Hop, StateDirectory, TopologyProvider};
use std::collections::HashMap;

/// Topology provider returning a fixed first hop for every vessel.
pub struct FixedTopology {
    ready: bool,
    hop: Option<Hop>,
}

impl FixedTopology {
    pub fn connected(hop: Hop) -> Self {
        Self {
            ready: true,
            hop: Some(hop),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            ready: true,
            hop: None,
        }
    }

    pub fn not_ready(hop: Hop) -> Self {
        Self {
            ready: false,
            hop: Some(hop),
        }
    }
}

impl TopologyProvider for FixedTopology {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn first_hop(&self, _vessel_id: &str) -> Option<Hop> {
        self.hop.clone()
    }
}

/// State directory backed by a plain map; display names equal ids.
#[derive(Default)]
pub struct MapDirectory {
    states: HashMap<String, ComputedLinkState>,
}

impl MapDirectory {
    pub fn insert(&mut self, id: &str, state: ComputedLinkState) {
        self.states.insert(id.to_string(), state);
    }

    /// Insert a linked state with the given path rate.
    pub fn insert_linked(&mut self, id: &str, rate_mb_s: f64) {
        let state = ComputedLinkState {
            status: crate::LinkStatus::DirectLink,
            linked: true,
            strength: 1.0,
            rate_mb_s,
            hop_rate_mb_s: rate_mb_s,
            ..ComputedLinkState::default()
        };
        self.insert(id, state);
    }
}

impl StateDirectory for MapDirectory {
    fn link_state(&self, vessel_id: &str) -> Option<&ComputedLinkState> {
        self.states.get(vessel_id)
    }

    fn display_name(&self, vessel_id: &str) -> Option<String> {
        self.states.contains_key(vessel_id).then(|| vessel_id.to_string())
    }
}

pub fn direct_hop(strength: f64) -> Hop {
    Hop {
        far_end_id: "GS-DSN".to_string(),
        far_end_name: "Deep Space Network".to_string(),
        far_end_is_ground_station: true,
        strength,
        distance_m: 1.2e9,
        start_transmit_power: 500.0,
        start_relay_power: 0.0,
        end_relay_power: 100_000.0,
    }
}

pub fn relay_hop(far_end_id: &str, strength: f64) -> Hop {
    Hop {
        far_end_id: far_end_id.to_string(),
        far_end_name: far_end_id.to_string(),
        far_end_is_ground_station: false,
        strength,
        distance_m: 4.0e8,
        start_transmit_power: 500.0,
        start_relay_power: 0.0,
        end_relay_power: 2_000.0,
    }
}
