//! Rate propagation engine.
//!
//! Turns one hop's raw signal strength into a damped data rate and folds
//! in the downstream vessel's already-computed rate, producing the
//! bottleneck rate for the whole path. Runs once per vessel per tick.

use crate::{
    blackout, ellipsis, CommsSettings, ComputedLinkState, EnvironmentInput, LinkStatus, Result,
    StateDirectory, TopologyProvider, TARGET_NAME_WIDTH,
};
use chrono::Utc;

pub struct LinkEngine {
    settings: CommsSettings,
}

impl LinkEngine {
    pub fn new(settings: CommsSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &CommsSettings {
        &self.settings
    }

    /// Compute a vessel's link state for this tick.
    ///
    /// Reads of other vessels' states through `peers` are snapshot reads;
    /// a not-yet-updated or missing downstream vessel contributes a rate
    /// of 0 for that segment and is not an error.
    pub fn update(
        &self,
        vessel_id: &str,
        env: &EnvironmentInput,
        topology: &dyn TopologyProvider,
        peers: &dyn StateDirectory,
    ) -> ComputedLinkState {
        let mut state = ComputedLinkState {
            powered: env.powered,
            storm: env.storm_blackout,
            transmitting: env.transmitting,
            power_transmit_w: env.power_transmit_w,
            power_idle_w: env.power_idle_w,
            computed_at: Utc::now(),
            ..ComputedLinkState::default()
        };

        let hop = if topology.is_ready() && env.powered {
            topology.first_hop(vessel_id)
        } else {
            None
        };

        let Some(hop) = hop else {
            state.linked = false;
            state.status = blackout::resolve(false, env.storm_blackout, env.atmospheric_blackout);
            state.strength = 0.0;
            state.rate_mb_s = 0.0;
            state.hop_rate_mb_s = 0.0;
            state.next_hop = None;
            state.target_name = String::new();
            state.hop_distance_m = 0.0;
            state.hop_max_distance_m = 0.0;
            return state;
        };

        state.linked = true;
        state.status = if hop.far_end_is_ground_station {
            LinkStatus::DirectLink
        } else {
            LinkStatus::IndirectLink
        };
        state.strength = hop.strength;
        state.target_name = ellipsis(&hop.far_end_name, TARGET_NAME_WIDTH);

        // Diminishing returns from weak signal rather than a linear falloff
        state.hop_rate_mb_s = env.base_rate_mb_s * hop.strength.powf(self.settings.damping_exponent);
        state.rate_mb_s = state.hop_rate_mb_s;

        if state.status == LinkStatus::IndirectLink {
            // Each hop applies the same min, so the stored rate ends up as
            // the bottleneck of the whole path. A relay whose state has not
            // been computed yet forwards nothing this tick.
            let downstream = peers
                .link_state(&hop.far_end_id)
                .map(|s| s.rate_mb_s)
                .unwrap_or(0.0);
            state.rate_mb_s = state.rate_mb_s.min(downstream);
            state.next_hop = Some(hop.far_end_id.clone());
        }

        // On a ground-terminating hop the relay antenna contributes to the
        // transmit side as well.
        let antenna_power = if hop.far_end_is_ground_station {
            hop.start_transmit_power + hop.start_relay_power
        } else {
            hop.start_transmit_power
        };
        state.hop_distance_m = hop.distance_m;
        state.hop_max_distance_m = (antenna_power * hop.end_relay_power).sqrt();

        state.rate_mb_s = self.settings.floor_clamp(state.rate_mb_s);
        state.hop_rate_mb_s = self.settings.floor_clamp(state.hop_rate_mb_s);

        state
    }
}

impl Default for LinkEngine {
    fn default() -> Self {
        Self {
            settings: CommsSettings::default(),
        }
    }
}
