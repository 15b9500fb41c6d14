//! Process-wide engine tuning, set at startup and immutable thereafter.

use crate::{CommsError, Result, BITS_PER_MB};
use serde::{Deserialize, Serialize};

/// Engine tuning constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommsSettings {
    /// Exponent applied to hop signal strength when deriving the data rate.
    /// Values toward 0 flatten the falloff, values toward 1 make weak
    /// signals cost proportionally more rate. Typical range 0.4-0.5.
    pub damping_exponent: f64,
    /// Floor applied to any nonzero rate, bit/s. Keeps vanishingly small
    /// rates from reaching consumers that would divide by them.
    pub min_rate_bits_per_s: f64,
}

impl Default for CommsSettings {
    fn default() -> Self {
        Self {
            damping_exponent: 0.45,
            min_rate_bits_per_s: 1.0,
        }
    }
}

impl CommsSettings {
    pub fn validate(&self) -> Result<()> {
        if !(self.damping_exponent > 0.0) {
            return Err(CommsError::InvalidDampingExponent(self.damping_exponent));
        }
        if self.min_rate_bits_per_s < 0.0 {
            return Err(CommsError::NegativeMinimumRate(self.min_rate_bits_per_s));
        }
        Ok(())
    }

    /// Apply the minimum-rate floor to a rate in MB/s.
    ///
    /// A rate of exactly zero stays zero; only nonzero rates below the
    /// floor are lifted to it.
    pub fn floor_clamp(&self, rate_mb_s: f64) -> f64 {
        if rate_mb_s > 0.0 && rate_mb_s * BITS_PER_MB < self.min_rate_bits_per_s {
            self.min_rate_bits_per_s / BITS_PER_MB
        } else {
            rate_mb_s
        }
    }
}
