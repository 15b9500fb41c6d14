//! Relay Comms Core
//!
//! Per-tick link-state computation for a multi-hop relay fleet:
//!
//! - Link status resolution (direct, relayed, blackout conditions)
//! - Signal-damped data rate with path-wide bottleneck propagation
//! - Bounded hop-chain walking for display
//! - Prioritized link-quality providers for the host's signal query
//!
//! The core is deliberately passive: topology discovery and the hardware
//! layer that derives a vessel's base transmit capacity live behind the
//! [`TopologyProvider`] and environment-input seams, and every vessel's
//! state is recomputed from scratch on each simulation tick.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod blackout;
pub mod engine;
pub mod modifier;
pub mod settings;
pub mod walker;

#[cfg(test)]
mod properties;
#[cfg(test)]
pub(crate) mod testutil;

pub use engine::LinkEngine;
pub use modifier::{LinkQualityProvider, ModifierChain};
pub use settings::CommsSettings;
pub use walker::{walk, HopRecord, GROUND_STATION_LABEL, MAX_WALK_HOPS};

/// Bits per megabyte, for the minimum-rate floor expressed in bit/s.
pub const BITS_PER_MB: f64 = 8.0 * 1024.0 * 1024.0;

/// Display width for `target_name`.
pub const TARGET_NAME_WIDTH: usize = 20;

#[derive(Error, Debug)]
pub enum CommsError {
    #[error("Damping exponent must be > 0, got {0}")]
    InvalidDampingExponent(f64),
    #[error("Minimum rate must be >= 0 bit/s, got {0}")]
    NegativeMinimumRate(f64),
}

pub type Result<T> = std::result::Result<T, CommsError>;

/// Signal connection link status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkStatus {
    /// First hop terminates at a ground station
    DirectLink,
    /// Relayed signal through at least one other vessel
    IndirectLink,
    NoLink,
    /// Atmospheric blackout (reentry plasma, ionospheric interference)
    AtmosphericBlackout,
    /// Radiation storm blackout
    StormBlackout,
}

impl LinkStatus {
    pub fn is_linked(&self) -> bool {
        matches!(self, LinkStatus::DirectLink | LinkStatus::IndirectLink)
    }
}

/// Per-vessel flags and hardware figures written by collaborators before
/// the engine runs for that vessel. Immutable from the engine's point of
/// view: the engine only echoes these into [`ComputedLinkState`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentInput {
    /// Vessel has enough power to operate its radio
    pub powered: bool,
    /// Vessel is currently subjected to a radiation storm
    pub storm_blackout: bool,
    /// Vessel is inside an atmospheric blackout region
    pub atmospheric_blackout: bool,
    /// Vessel transmitted science data last tick
    pub transmitting: bool,
    /// Hardware-supplied base transmit capacity, MB/s
    pub base_rate_mb_s: f64,
    /// Power draw while transmitting, W
    pub power_transmit_w: f64,
    /// Power draw while the radio is idle, W
    pub power_idle_w: f64,
}

impl Default for EnvironmentInput {
    fn default() -> Self {
        Self {
            powered: true,
            storm_blackout: false,
            atmospheric_blackout: false,
            transmitting: false,
            base_rate_mb_s: 0.0,
            power_transmit_w: 0.0,
            power_idle_w: 0.0,
        }
    }
}

/// One hop of a control path, as described by the topology provider.
///
/// `strength` is already clamped to [0, 1] by the provider's contract; the
/// engine uses it as given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hop {
    pub far_end_id: String,
    pub far_end_name: String,
    pub far_end_is_ground_station: bool,
    /// Signal quality of this hop, [0, 1]
    pub strength: f64,
    /// Geometric distance between the hop endpoints, m
    pub distance_m: f64,
    /// Transmit power figure of the near endpoint
    pub start_transmit_power: f64,
    /// Relay power figure of the near endpoint
    pub start_relay_power: f64,
    /// Relay power figure of the far endpoint
    pub end_relay_power: f64,
}

/// The per-vessel output record, recomputed every tick and owned
/// exclusively by that vessel's simulation entry. Written only by
/// [`LinkEngine::update`]; read-only afterward until the next tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputedLinkState {
    pub status: LinkStatus,
    /// True iff status is a direct or indirect link
    pub linked: bool,
    /// Signal quality of the first hop, [0, 1]. A value of -1 means no
    /// authority has computed this state yet; the host's signal query must
    /// fall back to another provider in that case.
    pub strength: f64,
    /// Bottleneck data rate along the entire path to the ground station, MB/s
    pub rate_mb_s: f64,
    /// Data rate of only the first hop, independent of downstream
    /// bottlenecks, MB/s
    pub hop_rate_mb_s: f64,
    /// Next vessel in the control path; `None` when directly linked to the
    /// ground station or unlinked
    pub next_hop: Option<String>,
    /// Name of the thing at the other end of the radio beam
    pub target_name: String,
    /// Distance to the next hop, m
    pub hop_distance_m: f64,
    /// Capacity-derived maximum range of the first hop, m
    pub hop_max_distance_m: f64,
    /// Power draw while transmitting, W
    pub power_transmit_w: f64,
    /// Power draw while idle, W
    pub power_idle_w: f64,
    pub transmitting: bool,
    pub storm: bool,
    pub powered: bool,
    pub computed_at: DateTime<Utc>,
}

impl Default for ComputedLinkState {
    fn default() -> Self {
        Self {
            status: LinkStatus::NoLink,
            linked: false,
            strength: -1.0,
            rate_mb_s: 0.0,
            hop_rate_mb_s: 0.0,
            next_hop: None,
            target_name: String::new(),
            hop_distance_m: 0.0,
            hop_max_distance_m: 0.0,
            power_transmit_w: 0.0,
            power_idle_w: 0.0,
            transmitting: false,
            storm: false,
            powered: true,
            computed_at: Utc::now(),
        }
    }
}

impl ComputedLinkState {
    /// Signal-strength modifier for the host's link-quality query.
    ///
    /// `None` until the engine has computed this state (strength still at
    /// the -1 sentinel), which tells the host to defer to another provider.
    pub fn strength_modifier(&self) -> Option<f64> {
        if self.strength >= 0.0 {
            Some(self.strength.clamp(0.0, 1.0))
        } else {
            None
        }
    }
}

/// Source of a vessel's control path, consumed by the engine.
///
/// The provider owns path discovery and the [0, 1] clamp on hop strength;
/// the engine does not re-validate either.
pub trait TopologyProvider {
    /// Whether the network has been initialized at all this tick
    fn is_ready(&self) -> bool;

    /// First hop of the vessel's control path, `None` if disconnected
    fn first_hop(&self, vessel_id: &str) -> Option<Hop>;
}

/// Read access to the fleet's already-computed link states, used for the
/// downstream-rate lookup and by the hop-chain walker.
///
/// Lookups are plain snapshot reads: during a tick some vessels hold this
/// tick's state and some still hold the previous tick's. That staleness is
/// accepted and converges over subsequent ticks.
pub trait StateDirectory {
    fn link_state(&self, vessel_id: &str) -> Option<&ComputedLinkState>;
    fn display_name(&self, vessel_id: &str) -> Option<String>;
}

/// Truncate a display string to `max` characters, appending an ellipsis.
pub fn ellipsis(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}
