//! Bounded hop-chain traversal for display.
//!
//! Read-only and on demand; never part of the per-tick update.

use crate::StateDirectory;
use serde::{Deserialize, Serialize};

/// Hard bound on walked hops. The per-tick update order can leave
/// transient cycles between states (each side derived from the other's
/// stale value), so an unbounded walk could loop forever. Sixteen is far
/// beyond any real path length.
pub const MAX_WALK_HOPS: usize = 16;

/// Display label for the ground segment terminating every path.
pub const GROUND_STATION_LABEL: &str = "DSN";

/// One rendered hop of a control path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HopRecord {
    pub from_name: String,
    pub to_name: String,
    /// Data rate of this hop alone, MB/s
    pub rate_mb_s: f64,
    /// Signal strength, clamped to [0, 1] for display
    pub strength: f64,
    pub distance_m: f64,
    pub max_distance_m: f64,
}

/// Follow `next_hop` links from a vessel and emit one record per hop.
///
/// Traversal ends at the ground station (`next_hop` empty), at the first
/// hop whose vessel state cannot be found (displayed as the ground station
/// by convention), or after [`MAX_WALK_HOPS`] records.
pub fn walk(start_id: &str, peers: &dyn StateDirectory) -> Vec<HopRecord> {
    let mut records = Vec::new();

    let Some(start) = peers.link_state(start_id) else {
        return records;
    };
    if !start.linked {
        return records;
    }

    let mut from_name = peers
        .display_name(start_id)
        .unwrap_or_else(|| start_id.to_string());
    let mut current = Some(start);

    while let Some(state) = current {
        if records.len() >= MAX_WALK_HOPS {
            break;
        }

        let (to_name, next) = match state.next_hop.as_deref() {
            None => (GROUND_STATION_LABEL.to_string(), None),
            Some(next_id) => match peers.link_state(next_id) {
                Some(next_state) => (
                    peers
                        .display_name(next_id)
                        .unwrap_or_else(|| next_id.to_string()),
                    Some(next_state),
                ),
                // Path terminates early; rendered as the ground station
                None => (GROUND_STATION_LABEL.to_string(), None),
            },
        };

        records.push(HopRecord {
            from_name,
            to_name: to_name.clone(),
            rate_mb_s: state.hop_rate_mb_s,
            strength: state.strength.clamp(0.0, 1.0),
            distance_m: state.hop_distance_m,
            max_distance_m: state.hop_max_distance_m,
        });

        from_name = to_name;
        current = next;
    }

    records
}
