//! Science transmission budget and power accounting.
//!
//! Runs right after a vessel's link state is recomputed: the path
//! bottleneck rate caps how much queued science leaves the vessel this
//! tick, and the radio's power draw is charged at the transmit or idle
//! figure accordingly. Sets the `transmitting` echo flag consumed by the
//! next tick's engine pass.

use crate::fleet::Vessel;

pub fn apply(vessel: &mut Vessel, dt_s: f64) {
    let sending =
        vessel.link.linked && vessel.science_queue_mb > 0.0 && vessel.link.rate_mb_s > 0.0;

    if sending {
        let sent = (vessel.link.rate_mb_s * dt_s).min(vessel.science_queue_mb);
        vessel.science_queue_mb -= sent;
        vessel.science_sent_mb += sent;
        vessel.energy_used_j += vessel.env.power_transmit_w * dt_s;
    } else if vessel.env.powered {
        vessel.energy_used_j += vessel.env.power_idle_w * dt_s;
    }

    vessel.env.transmitting = sending;
}
