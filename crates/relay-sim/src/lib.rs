//! Relay Fleet Simulator
//!
//! Tick-driven host around the link-state core: loads a fleet scenario,
//! runs the per-vessel network update once per tick, applies the science
//! transmission budget, and reports the resulting link states.
//!
//! Usage:
//!   relay-sim --scenario data/scenarios/relay_fleet.json --ticks 10

use chrono::{DateTime, Utc};
use relay_comms::{ComputedLinkState, EnvironmentInput};
use relay_topology::{NetworkGraph, NetworkNode, RadioLink};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

pub mod fleet;
pub mod loader;
pub mod transmit;

pub use fleet::{Fleet, Vessel};

#[derive(Error, Debug)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Scenario has no vessels")]
    EmptyFleet,
    #[error("Duplicate node id: {0}")]
    DuplicateId(String),
    #[error("Link references unknown node: {0}")]
    UnknownLinkEndpoint(String),
    #[error(transparent)]
    Topology(#[from] relay_topology::TopologyError),
    #[error(transparent)]
    Comms(#[from] relay_comms::CommsError),
}

pub type Result<T> = std::result::Result<T, SimError>;

/// A fleet scenario: who flies, who relays, and which radio links exist
/// with what quality. Strengths and distances are inputs, not physics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub ground_stations: Vec<StationSpec>,
    pub vessels: Vec<VesselSpec>,
    pub links: Vec<LinkSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationSpec {
    pub id: String,
    pub name: String,
    pub relay_power: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VesselSpec {
    pub id: String,
    pub name: String,
    pub transmit_power: f64,
    #[serde(default)]
    pub relay_power: f64,
    #[serde(default)]
    pub environment: EnvironmentInput,
    /// Science data waiting on board, MB
    #[serde(default)]
    pub science_queue_mb: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkSpec {
    pub a: String,
    pub b: String,
    /// Signal quality, [0, 1]
    pub strength: f64,
    pub distance_m: f64,
}

impl Scenario {
    pub fn validate(&self) -> Result<()> {
        if self.vessels.is_empty() {
            return Err(SimError::EmptyFleet);
        }

        let mut ids = HashSet::new();
        for id in self
            .ground_stations
            .iter()
            .map(|s| &s.id)
            .chain(self.vessels.iter().map(|v| &v.id))
        {
            if !ids.insert(id.as_str()) {
                return Err(SimError::DuplicateId(id.clone()));
            }
        }

        for link in &self.links {
            for end in [&link.a, &link.b] {
                if !ids.contains(end.as_str()) {
                    return Err(SimError::UnknownLinkEndpoint(end.clone()));
                }
            }
        }

        Ok(())
    }

    /// Materialize the network graph backing the topology provider.
    pub fn build_graph(&self) -> Result<NetworkGraph> {
        let mut net = NetworkGraph::new();
        for station in &self.ground_stations {
            net.add_node(NetworkNode::ground_station(
                &station.id,
                &station.name,
                station.relay_power,
            ))?;
        }
        for vessel in &self.vessels {
            net.add_node(NetworkNode::vessel(
                &vessel.id,
                &vessel.name,
                vessel.transmit_power,
                vessel.relay_power,
            ))?;
        }
        for link in &self.links {
            net.add_link(&link.a, &link.b, RadioLink::new(link.strength, link.distance_m))?;
        }
        Ok(net)
    }
}

/// Final state of one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub scenario: String,
    pub generated_at: DateTime<Utc>,
    pub ticks: u64,
    pub tick_seconds: f64,
    pub vessels: Vec<VesselReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VesselReport {
    pub id: String,
    pub name: String,
    pub link: ComputedLinkState,
    pub science_queue_mb: f64,
    pub science_sent_mb: f64,
    pub energy_used_j: f64,
}
