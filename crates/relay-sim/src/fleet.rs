//! Per-tick fleet update pass.
//!
//! Each vessel exclusively owns its link state; one synchronous pass per
//! tick recomputes every state in deterministic id order. A vessel's
//! downstream lookup sees this tick's value for fleet members that updated
//! before it and last tick's value for the rest, so multi-hop rates can
//! lag one tick behind a changed downstream link and converge as ticks
//! repeat.

use crate::{transmit, Result, RunReport, Scenario, VesselReport};
use chrono::Utc;
use relay_comms::{
    CommsSettings, ComputedLinkState, EnvironmentInput, LinkEngine, LinkQualityProvider,
    StateDirectory, TopologyProvider,
};
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

/// One simulated vessel: environment inputs, computed link state, and the
/// running science/energy totals.
#[derive(Debug, Clone)]
pub struct Vessel {
    pub id: String,
    pub name: String,
    pub env: EnvironmentInput,
    pub link: ComputedLinkState,
    pub science_queue_mb: f64,
    pub science_sent_mb: f64,
    pub energy_used_j: f64,
}

pub struct Fleet {
    vessels: BTreeMap<String, Vessel>,
    engine: LinkEngine,
    ticks: u64,
}

impl Fleet {
    pub fn from_scenario(scenario: &Scenario, settings: CommsSettings) -> Result<Self> {
        let engine = LinkEngine::new(settings)?;
        let mut vessels = BTreeMap::new();
        for spec in &scenario.vessels {
            vessels.insert(
                spec.id.clone(),
                Vessel {
                    id: spec.id.clone(),
                    name: spec.name.clone(),
                    env: spec.environment.clone(),
                    link: ComputedLinkState::default(),
                    science_queue_mb: spec.science_queue_mb,
                    science_sent_mb: 0.0,
                    energy_used_j: 0.0,
                },
            );
        }
        Ok(Self {
            vessels,
            engine,
            ticks: 0,
        })
    }

    /// Run one simulation tick: recompute every vessel's link state, then
    /// apply its transmission budget for `dt_s` simulated seconds.
    pub fn tick(&mut self, topology: &dyn TopologyProvider, dt_s: f64) {
        let ids: Vec<String> = self.vessels.keys().cloned().collect();

        for id in ids {
            let Some(vessel) = self.vessels.get(&id) else {
                continue;
            };
            let state =
                self.engine
                    .update(&id, &vessel.env, topology, &VesselDirectory(&self.vessels));

            let Some(vessel) = self.vessels.get_mut(&id) else {
                continue;
            };
            vessel.link = state;
            transmit::apply(vessel, dt_s);

            debug!(
                vessel = %id,
                status = ?vessel.link.status,
                rate_mb_s = vessel.link.rate_mb_s,
                "link updated"
            );
        }

        self.ticks += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn vessels(&self) -> impl Iterator<Item = &Vessel> {
        self.vessels.values()
    }

    pub fn vessel(&self, id: &str) -> Option<&Vessel> {
        self.vessels.get(id)
    }

    /// Environment inputs are collaborator-owned; hosts mutate them
    /// between ticks (power loss, storm onset, new science).
    pub fn environment_mut(&mut self, id: &str) -> Option<&mut EnvironmentInput> {
        self.vessels.get_mut(id).map(|v| &mut v.env)
    }

    pub fn report(&self, scenario_name: &str, tick_seconds: f64) -> RunReport {
        RunReport {
            run_id: Uuid::new_v4(),
            scenario: scenario_name.to_string(),
            generated_at: Utc::now(),
            ticks: self.ticks,
            tick_seconds,
            vessels: self
                .vessels
                .values()
                .map(|v| VesselReport {
                    id: v.id.clone(),
                    name: v.name.clone(),
                    link: v.link.clone(),
                    science_queue_mb: v.science_queue_mb,
                    science_sent_mb: v.science_sent_mb,
                    energy_used_j: v.energy_used_j,
                })
                .collect(),
        }
    }
}

/// Newtype carrying the `StateDirectory` impl: the trait and `BTreeMap`
/// are both foreign, so the impl cannot live on the map directly
/// (orphan rule). Wrapping a borrow of the map keeps behavior identical.
struct VesselDirectory<'a>(&'a BTreeMap<String, Vessel>);

impl StateDirectory for VesselDirectory<'_> {
    fn link_state(&self, vessel_id: &str) -> Option<&ComputedLinkState> {
        self.0.get(vessel_id).map(|v| &v.link)
    }

    fn display_name(&self, vessel_id: &str) -> Option<String> {
        self.0.get(vessel_id).map(|v| v.name.clone())
    }
}

impl StateDirectory for Fleet {
    fn link_state(&self, vessel_id: &str) -> Option<&ComputedLinkState> {
        self.vessels.get(vessel_id).map(|v| &v.link)
    }

    fn display_name(&self, vessel_id: &str) -> Option<String> {
        self.vessels.get(vessel_id).map(|v| v.name.clone())
    }
}

/// The fleet is authoritative for a vessel's signal modifier only once the
/// engine has computed its state; before that the host falls through to
/// the next provider in its chain.
impl LinkQualityProvider for Fleet {
    fn try_modifier(&self, vessel_id: &str) -> Option<f64> {
        self.vessels
            .get(vessel_id)
            .and_then(|v| v.link.strength_modifier())
    }
}
